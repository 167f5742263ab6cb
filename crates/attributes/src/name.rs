//! Attribute names understood by the user pool

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const CUSTOM_PREFIX: &str = "custom:";

/// 属性名のパースエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown attribute name: {0}")]
pub struct UnknownAttributeName(pub String);

/// Standard and custom user pool attribute names
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CognitoAttributeName {
    Address,
    Birthdate,
    Email,
    EmailVerified,
    FamilyName,
    Gender,
    GivenName,
    Locale,
    MiddleName,
    Name,
    Nickname,
    PhoneNumber,
    PhoneNumberVerified,
    Picture,
    PreferredUsername,
    Profile,
    UpdatedAt,
    Website,
    Zoneinfo,
    /// `custom:<suffix>`; holds the suffix only
    Custom(String),
}

impl CognitoAttributeName {
    /// Build a custom attribute name from its suffix
    pub fn custom(suffix: impl Into<String>) -> Self {
        Self::Custom(suffix.into())
    }

    fn standard_name(&self) -> Option<&'static str> {
        let name = match self {
            Self::Address => "address",
            Self::Birthdate => "birthdate",
            Self::Email => "email",
            Self::EmailVerified => "email_verified",
            Self::FamilyName => "family_name",
            Self::Gender => "gender",
            Self::GivenName => "given_name",
            Self::Locale => "locale",
            Self::MiddleName => "middle_name",
            Self::Name => "name",
            Self::Nickname => "nickname",
            Self::PhoneNumber => "phone_number",
            Self::PhoneNumberVerified => "phone_number_verified",
            Self::Picture => "picture",
            Self::PreferredUsername => "preferred_username",
            Self::Profile => "profile",
            Self::UpdatedAt => "updated_at",
            Self::Website => "website",
            Self::Zoneinfo => "zoneinfo",
            Self::Custom(_) => return None,
        };
        Some(name)
    }
}

impl fmt::Display for CognitoAttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(suffix) => write!(f, "{}{}", CUSTOM_PREFIX, suffix),
            other => f.write_str(other.standard_name().unwrap_or_default()),
        }
    }
}

impl FromStr for CognitoAttributeName {
    type Err = UnknownAttributeName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(suffix) = s.strip_prefix(CUSTOM_PREFIX) {
            if suffix.is_empty() {
                return Err(UnknownAttributeName(s.to_string()));
            }
            return Ok(Self::Custom(suffix.to_string()));
        }

        let name = match s {
            "address" => Self::Address,
            "birthdate" => Self::Birthdate,
            "email" => Self::Email,
            "email_verified" => Self::EmailVerified,
            "family_name" => Self::FamilyName,
            "gender" => Self::Gender,
            "given_name" => Self::GivenName,
            "locale" => Self::Locale,
            "middle_name" => Self::MiddleName,
            "name" => Self::Name,
            "nickname" => Self::Nickname,
            "phone_number" => Self::PhoneNumber,
            "phone_number_verified" => Self::PhoneNumberVerified,
            "picture" => Self::Picture,
            "preferred_username" => Self::PreferredUsername,
            "profile" => Self::Profile,
            "updated_at" => Self::UpdatedAt,
            "website" => Self::Website,
            "zoneinfo" => Self::Zoneinfo,
            _ => return Err(UnknownAttributeName(s.to_string())),
        };
        Ok(name)
    }
}

impl Serialize for CognitoAttributeName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CognitoAttributeName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Attributes an administrator can mark as verified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifiableAttribute {
    EmailVerified,
    PhoneNumberVerified,
}

impl VerifiableAttribute {
    pub fn attribute_name(&self) -> CognitoAttributeName {
        match self {
            Self::EmailVerified => CognitoAttributeName::EmailVerified,
            Self::PhoneNumberVerified => CognitoAttributeName::PhoneNumberVerified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_names_round_trip_through_strings() {
        for raw in ["email", "given_name", "phone_number_verified", "zoneinfo"] {
            let name: CognitoAttributeName = raw.parse().unwrap();
            assert_eq!(name.to_string(), raw);
        }
    }

    #[test]
    fn test_custom_name() {
        let name: CognitoAttributeName = "custom:tenant".parse().unwrap();
        assert_eq!(name, CognitoAttributeName::custom("tenant"));
        assert_eq!(name.to_string(), "custom:tenant");
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        assert!("favourite_colour".parse::<CognitoAttributeName>().is_err());
        assert!("custom:".parse::<CognitoAttributeName>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_name() {
        let json = serde_json::to_string(&CognitoAttributeName::FamilyName).unwrap();
        assert_eq!(json, "\"family_name\"");
        let back: CognitoAttributeName = serde_json::from_str("\"custom:plan\"").unwrap();
        assert_eq!(back, CognitoAttributeName::custom("plan"));
    }

    #[test]
    fn test_verifiable_attribute_names() {
        assert_eq!(
            VerifiableAttribute::EmailVerified.attribute_name().to_string(),
            "email_verified"
        );
        assert_eq!(
            VerifiableAttribute::PhoneNumberVerified.attribute_name().to_string(),
            "phone_number_verified"
        );
    }
}

//! User search filters

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::provider::UserType;

/// Attributes the user pool can filter listings on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchableAttribute {
    Username,
    Email,
    PhoneNumber,
    Name,
    GivenName,
    FamilyName,
    PreferredUsername,
    #[serde(rename = "cognito:user_status")]
    UserStatus,
    /// Enabled or disabled
    Status,
    Sub,
}

impl SearchableAttribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchableAttribute::Username => "username",
            SearchableAttribute::Email => "email",
            SearchableAttribute::PhoneNumber => "phone_number",
            SearchableAttribute::Name => "name",
            SearchableAttribute::GivenName => "given_name",
            SearchableAttribute::FamilyName => "family_name",
            SearchableAttribute::PreferredUsername => "preferred_username",
            SearchableAttribute::UserStatus => "cognito:user_status",
            SearchableAttribute::Status => "status",
            SearchableAttribute::Sub => "sub",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    #[default]
    Equals,
    StartsWith,
}

/// A single attribute condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchUserFilter {
    pub attribute: SearchableAttribute,
    pub value: String,
    #[serde(default)]
    pub match_type: MatchType,
}

impl SearchUserFilter {
    pub fn equals(attribute: SearchableAttribute, value: &str) -> Self {
        Self {
            attribute,
            value: value.to_string(),
            match_type: MatchType::Equals,
        }
    }

    pub fn starts_with(attribute: SearchableAttribute, value: &str) -> Self {
        Self {
            attribute,
            value: value.to_string(),
            match_type: MatchType::StartsWith,
        }
    }

    /// Evaluate the condition on a listed user
    pub fn matches(&self, user: &UserType) -> bool {
        let actual = match self.attribute {
            SearchableAttribute::Username => user.username.clone(),
            SearchableAttribute::UserStatus => user.user_status.clone(),
            SearchableAttribute::Status => user
                .enabled
                .map(|enabled| (if enabled { "Enabled" } else { "Disabled" }).to_string()),
            other => user.attributes.as_ref().and_then(|attributes| {
                attributes
                    .iter()
                    .rev()
                    .find(|a| a.is_present() && a.name == other.as_str())
                    .map(|a| a.value.clone())
            }),
        };

        match (actual, self.match_type) {
            (Some(actual), MatchType::Equals) => actual == self.value,
            (Some(actual), MatchType::StartsWith) => actual.starts_with(&self.value),
            (None, _) => false,
        }
    }
}

/// Renders the user pool filter expression
impl fmt::Display for SearchUserFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self.match_type {
            MatchType::Equals => "=",
            MatchType::StartsWith => "^=",
        };
        let value = self.value.replace('\\', "\\\\").replace('"', "\\\"");
        write!(f, "{} {} \"{}\"", self.attribute.as_str(), operator, value)
    }
}

/// Options of the listing operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchUsersParameters {
    pub filter: Option<SearchUserFilter>,
    /// Look up the groups of every listed user
    #[serde(default)]
    pub include_groups: bool,
}

impl SearchUsersParameters {
    pub fn with_filter(mut self, filter: SearchUserFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_groups(mut self) -> Self {
        self.include_groups = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cognito_rust_attributes::ProviderAttribute;

    fn user() -> UserType {
        UserType {
            username: Some("ada".to_string()),
            attributes: Some(vec![
                ProviderAttribute::new("email", "ada@example.com"),
                ProviderAttribute::new("given_name", "Ada"),
            ]),
            enabled: Some(true),
            user_status: Some("CONFIRMED".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_filter_expression() {
        assert_eq!(
            SearchUserFilter::equals(SearchableAttribute::Email, "a@b.com").to_string(),
            r#"email = "a@b.com""#
        );
        assert_eq!(
            SearchUserFilter::starts_with(SearchableAttribute::UserStatus, "FORCE").to_string(),
            r#"cognito:user_status ^= "FORCE""#
        );
        assert_eq!(
            SearchUserFilter::equals(SearchableAttribute::Name, r#"a "b" \c"#).to_string(),
            r#"name = "a \"b\" \\c""#
        );
    }

    #[test]
    fn test_matches_listed_user() {
        let user = user();
        assert!(SearchUserFilter::equals(SearchableAttribute::Email, "ada@example.com").matches(&user));
        assert!(SearchUserFilter::starts_with(SearchableAttribute::GivenName, "Ad").matches(&user));
        assert!(SearchUserFilter::equals(SearchableAttribute::Username, "ada").matches(&user));
        assert!(SearchUserFilter::equals(SearchableAttribute::Status, "Enabled").matches(&user));
        assert!(SearchUserFilter::equals(SearchableAttribute::UserStatus, "CONFIRMED").matches(&user));
        assert!(!SearchUserFilter::equals(SearchableAttribute::Email, "ada").matches(&user));
        assert!(!SearchUserFilter::equals(SearchableAttribute::PhoneNumber, "").matches(&user));
    }
}

//! User records returned by the services

mod assembler;
mod service;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use assembler::{AccountMetadata, FitInfo, UserAssembler};
pub use service::{CognitoUserService, UserService};

/// ユーザー識別子のみ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicUserInfo {
    pub id: String,
}

/// Identity plus the attributes decoded through the user structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo<A> {
    pub id: String,
    #[serde(flatten)]
    pub attributes: A,
}

/// Account status as reported by the user pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    #[default]
    Unknown,
    Unconfirmed,
    Confirmed,
    Archived,
    Compromised,
    ResetRequired,
    ForceChangePassword,
}

impl UserStatus {
    /// Map a provider status; anything unrecognized is `Unknown`
    pub fn from_provider(status: Option<&str>) -> Self {
        match status {
            Some("UNCONFIRMED") => UserStatus::Unconfirmed,
            Some("CONFIRMED") => UserStatus::Confirmed,
            Some("ARCHIVED") => UserStatus::Archived,
            Some("COMPROMISED") => UserStatus::Compromised,
            Some("RESET_REQUIRED") => UserStatus::ResetRequired,
            Some("FORCE_CHANGE_PASSWORD") => UserStatus::ForceChangePassword,
            _ => UserStatus::Unknown,
        }
    }
}

/// Account metadata attached to a complete user view
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAdditionalInfo {
    pub is_enabled: Option<bool>,
    pub created_date: Option<DateTime<Utc>>,
    pub last_modified_date: Option<DateTime<Utc>>,
    pub status: UserStatus,
}

/// User view used by the administrative service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteUserInfo<A> {
    #[serde(flatten)]
    pub info: UserInfo<A>,
    pub groups: Vec<String>,
    pub additional_information: UserAdditionalInfo,
}

impl<A> CompleteUserInfo<A> {
    pub fn id(&self) -> &str {
        &self.info.id
    }

    pub fn attributes(&self) -> &A {
        &self.info.attributes
    }
}

/// Username and password pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

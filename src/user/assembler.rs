use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use cognito_rust_attributes::{present_attributes, ProviderAttribute, UserStructure};

use super::{BasicUserInfo, CompleteUserInfo, UserAdditionalInfo, UserInfo, UserStatus};
use crate::error::Error;
use crate::provider::UserType;

/// Hook applied to sign-up and update payloads before they are encoded
pub type FitInfo<A> = Arc<dyn Fn(A) -> A + Send + Sync>;

/// Account fields reported next to the attributes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountMetadata {
    pub enabled: Option<bool>,
    /// Seconds since the epoch
    pub created: Option<f64>,
    /// Seconds since the epoch
    pub last_modified: Option<f64>,
    pub status: Option<String>,
}

/// Builds user records from provider data using the user structure
pub struct UserAssembler<A> {
    structure: UserStructure<A>,
    fit_sign_up_info: FitInfo<A>,
    fit_user_update_info: FitInfo<A>,
}

impl<A> Clone for UserAssembler<A> {
    fn clone(&self) -> Self {
        Self {
            structure: self.structure.clone(),
            fit_sign_up_info: Arc::clone(&self.fit_sign_up_info),
            fit_user_update_info: Arc::clone(&self.fit_user_update_info),
        }
    }
}

impl<A> fmt::Debug for UserAssembler<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAssembler")
            .field("structure", &self.structure)
            .finish_non_exhaustive()
    }
}

impl<A: Default> UserAssembler<A> {
    pub fn new(structure: UserStructure<A>) -> Self {
        Self {
            structure,
            fit_sign_up_info: Arc::new(|info| info),
            fit_user_update_info: Arc::new(|info| info),
        }
    }

    pub fn with_fit_sign_up_info<F>(mut self, fit: F) -> Self
    where
        F: Fn(A) -> A + Send + Sync + 'static,
    {
        self.fit_sign_up_info = Arc::new(fit);
        self
    }

    pub fn with_fit_user_update_info<F>(mut self, fit: F) -> Self
    where
        F: Fn(A) -> A + Send + Sync + 'static,
    {
        self.fit_user_update_info = Arc::new(fit);
        self
    }

    pub fn structure(&self) -> &UserStructure<A> {
        &self.structure
    }

    /// Attributes sent on sign-up and administrative creation
    pub fn sign_up_attributes(&self, info: A) -> Vec<ProviderAttribute> {
        self.structure.encode(&(self.fit_sign_up_info)(info), false)
    }

    /// Attributes sent on profile updates
    pub fn update_attributes(&self, info: A) -> Vec<ProviderAttribute> {
        self.structure.encode(&(self.fit_user_update_info)(info), false)
    }

    pub fn basic(&self, username: &str) -> BasicUserInfo {
        BasicUserInfo {
            id: username.to_string(),
        }
    }

    pub fn user_info(&self, username: &str, attributes: Vec<ProviderAttribute>) -> UserInfo<A> {
        let attributes = present_attributes(attributes);
        UserInfo {
            id: self.basic(username).id,
            attributes: self.structure.decode(&attributes),
        }
    }

    pub fn complete(
        &self,
        username: &str,
        attributes: Vec<ProviderAttribute>,
        metadata: AccountMetadata,
        groups: Vec<String>,
    ) -> CompleteUserInfo<A> {
        CompleteUserInfo {
            info: self.user_info(username, attributes),
            groups,
            additional_information: UserAdditionalInfo {
                is_enabled: metadata.enabled,
                created_date: metadata.created.and_then(timestamp),
                last_modified_date: metadata.last_modified.and_then(timestamp),
                status: UserStatus::from_provider(metadata.status.as_deref()),
            },
        }
    }

    /// Complete view of a listed or created user
    ///
    /// Users without a username or an attribute list cannot be represented.
    pub fn from_user_type(
        &self,
        user: UserType,
        groups: Vec<String>,
    ) -> Result<CompleteUserInfo<A>, Error> {
        let (username, attributes) = match (user.username, user.attributes) {
            (Some(username), Some(attributes)) => (username, attributes),
            _ => {
                return Err(Error::UserNotRetrieved(
                    "user without username or attributes".to_string(),
                ))
            }
        };
        let metadata = AccountMetadata {
            enabled: user.enabled,
            created: user.user_create_date,
            last_modified: user.user_last_modified_date,
            status: user.user_status,
        };
        Ok(self.complete(&username, attributes, metadata, groups))
    }
}

impl<A: Default> From<UserStructure<A>> for UserAssembler<A> {
    fn from(structure: UserStructure<A>) -> Self {
        UserAssembler::new(structure)
    }
}

fn timestamp(seconds: f64) -> Option<DateTime<Utc>> {
    let whole = seconds.trunc();
    let nanos = ((seconds - whole) * 1e9).round() as u32;
    DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
}

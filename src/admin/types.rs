//! Inputs of administrative user creation

use serde::{Deserialize, Serialize};

/// Username and optional temporary password of a created user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCreateUserCredentials {
    pub username: String,
    pub password: Option<String>,
}

impl AdminCreateUserCredentials {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            password: None,
        }
    }

    pub fn with_password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }
}

/// What happens to the invitation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageAction {
    Resend,
    Suppress,
}

impl MessageAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageAction::Resend => "RESEND",
            MessageAction::Suppress => "SUPPRESS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryMedium {
    Email,
    Sms,
}

impl DeliveryMedium {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMedium::Email => "EMAIL",
            DeliveryMedium::Sms => "SMS",
        }
    }
}

/// Invitation message settings; mediums default to email
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSignupMessageConfig {
    pub action: Option<MessageAction>,
    pub delivery_mediums: Option<Vec<DeliveryMedium>>,
}

impl PostSignupMessageConfig {
    pub(crate) fn provider_mediums(&self) -> Vec<String> {
        match &self.delivery_mediums {
            Some(mediums) if !mediums.is_empty() => {
                mediums.iter().map(|m| m.as_str().to_string()).collect()
            }
            _ => vec![DeliveryMedium::Email.as_str().to_string()],
        }
    }
}

/// Everything needed to create a user as an administrator
#[derive(Debug, Clone)]
pub struct CreateUserParams<A> {
    pub credentials: AdminCreateUserCredentials,
    pub attributes: A,
    /// Added one after the other once the user exists
    pub groups: Vec<String>,
    pub post_signup_message: PostSignupMessageConfig,
    pub force_email_verification: bool,
    pub force_phone_number_verification: bool,
}

impl<A> CreateUserParams<A> {
    pub fn new(credentials: AdminCreateUserCredentials, attributes: A) -> Self {
        Self {
            credentials,
            attributes,
            groups: Vec::new(),
            post_signup_message: PostSignupMessageConfig::default(),
            force_email_verification: false,
            force_phone_number_verification: false,
        }
    }

    pub fn with_groups(mut self, groups: &[&str]) -> Self {
        self.groups = groups.iter().map(|g| g.to_string()).collect();
        self
    }

    pub fn with_post_signup_message(mut self, config: PostSignupMessageConfig) -> Self {
        self.post_signup_message = config;
        self
    }

    pub fn with_force_email_verification(mut self, value: bool) -> Self {
        self.force_email_verification = value;
        self
    }

    pub fn with_force_phone_number_verification(mut self, value: bool) -> Self {
        self.force_phone_number_verification = value;
        self
    }
}

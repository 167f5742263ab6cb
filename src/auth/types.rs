//! Types for login, tokens and authentication challenges

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Tokens issued once a login flow completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserToken {
    pub access_token: String,
    pub id_token: String,
    pub refresh_token: String,
}

impl UserToken {
    pub fn new(access_token: &str, id_token: &str, refresh_token: &str) -> Self {
        Self {
            access_token: access_token.to_string(),
            id_token: id_token.to_string(),
            refresh_token: refresh_token.to_string(),
        }
    }

    pub fn refresh_auth_token(&self) -> RefreshAuthToken {
        RefreshAuthToken {
            refresh_token: self.refresh_token.clone(),
        }
    }

    pub fn user_auth_token(&self) -> UserAuthToken {
        UserAuthToken {
            access_token: self.access_token.clone(),
            id_token: self.id_token.clone(),
        }
    }
}

/// リフレッシュトークンのみ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshAuthToken {
    pub refresh_token: String,
}

impl RefreshAuthToken {
    pub fn new(refresh_token: &str) -> Self {
        Self {
            refresh_token: refresh_token.to_string(),
        }
    }
}

/// Access and ID token pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAuthToken {
    pub access_token: String,
    pub id_token: String,
}

/// Challenges a paused login may ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthChallengeName {
    CustomChallenge,
    NewPasswordRequired,
}

impl AuthChallengeName {
    /// Map a user pool challenge name; unmapped challenges give `None`
    pub fn from_provider(name: &str) -> Option<Self> {
        match name {
            "CUSTOM_CHALLENGE" => Some(AuthChallengeName::CustomChallenge),
            "NEW_PASSWORD_REQUIRED" => Some(AuthChallengeName::NewPasswordRequired),
            _ => None,
        }
    }

    pub fn as_provider_str(&self) -> &'static str {
        match self {
            AuthChallengeName::CustomChallenge => "CUSTOM_CHALLENGE",
            AuthChallengeName::NewPasswordRequired => "NEW_PASSWORD_REQUIRED",
        }
    }
}

impl fmt::Display for AuthChallengeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_provider_str())
    }
}

/// State the caller holds between a challenge and its completion
///
/// `parameters` are echoed back in the response; `session` correlates the
/// response with the attempt that raised the challenge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthChallengeOptions {
    #[serde(default)]
    pub parameters: HashMap<String, String>,
    pub session: Option<String>,
}

/// A paused login flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthChallenge {
    pub name: AuthChallengeName,
    pub options: AuthChallengeOptions,
}

/// Outcome of a login step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoginResult {
    Token(UserToken),
    Challenge {
        #[serde(rename = "authChallenge")]
        auth_challenge: AuthChallenge,
    },
}

impl LoginResult {
    pub fn token(&self) -> Option<&UserToken> {
        match self {
            LoginResult::Token(token) => Some(token),
            LoginResult::Challenge { .. } => None,
        }
    }

    pub fn challenge(&self) -> Option<&AuthChallenge> {
        match self {
            LoginResult::Token(_) => None,
            LoginResult::Challenge { auth_challenge } => Some(auth_challenge),
        }
    }

    pub fn into_token(self) -> Option<UserToken> {
        match self {
            LoginResult::Token(token) => Some(token),
            LoginResult::Challenge { .. } => None,
        }
    }
}

/// Caller input resuming a paused login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthChallengeCompletion {
    /// `response` is merged into the challenge responses
    #[serde(rename_all = "camelCase")]
    CustomChallenge {
        username: String,
        #[serde(default)]
        response: HashMap<String, String>,
    },
    #[serde(rename_all = "camelCase")]
    NewPasswordRequired {
        username: String,
        new_password: String,
    },
}

impl AuthChallengeCompletion {
    /// Custom challenge answered with a single `ANSWER`
    pub fn custom_answer(username: &str, answer: &str) -> Self {
        let mut response = HashMap::new();
        response.insert("ANSWER".to_string(), answer.to_string());
        AuthChallengeCompletion::CustomChallenge {
            username: username.to_string(),
            response,
        }
    }

    pub fn new_password(username: &str, new_password: &str) -> Self {
        AuthChallengeCompletion::NewPasswordRequired {
            username: username.to_string(),
            new_password: new_password.to_string(),
        }
    }

    pub fn name(&self) -> AuthChallengeName {
        match self {
            AuthChallengeCompletion::CustomChallenge { .. } => AuthChallengeName::CustomChallenge,
            AuthChallengeCompletion::NewPasswordRequired { .. } => {
                AuthChallengeName::NewPasswordRequired
            }
        }
    }

    pub fn username(&self) -> &str {
        match self {
            AuthChallengeCompletion::CustomChallenge { username, .. }
            | AuthChallengeCompletion::NewPasswordRequired { username, .. } => username,
        }
    }
}

/// Data for confirming a forgotten password
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordData {
    pub username: String,
    pub new_password: String,
    pub confirmation_code: String,
}

/// Password change for a logged-in user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCredentialsInfo {
    pub old_password: String,
    pub new_password: String,
}

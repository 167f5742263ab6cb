//! Error handling for the Cognito services
//!
//! Failures coming back from the user pool are described by [`ProviderError`]
//! and classified exactly once into [`Error`] when they cross a service
//! boundary (the `From` conversion below, applied by `?`).

use std::fmt;
use thiserror::Error;

use cognito_rust_attributes::StructureError;

/// Normalized error taxonomy returned by every service
#[derive(Error, Debug)]
pub enum Error {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    #[error("Wrong username or password: {0}")]
    WrongUsernameOrPassword(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Invalid or expired code: {0}")]
    InvalidOrExpiredCode(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Password change required: {0}")]
    ForceChangePasswordRequired(String),

    #[error("User not retrieved: {0}")]
    UserNotRetrieved(String),

    #[error("Unknown internal error: {0}")]
    UnknownInternal(String),

    /// Raised only while building services
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl Error {
    pub fn unauthorized<T: fmt::Display>(msg: T) -> Self {
        Error::Unauthorized(msg.to_string())
    }

    pub fn user_not_found<T: fmt::Display>(msg: T) -> Self {
        Error::UserNotFound(msg.to_string())
    }

    pub fn internal<T: fmt::Display>(msg: T) -> Self {
        Error::UnknownInternal(msg.to_string())
    }

    pub fn invalid_parameter<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidParameter(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by the user pool client
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The service rejected the call with a named exception
    #[error("[{name}] {message}")]
    Service { name: String, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Signing error: {0}")]
    Signing(String),
}

impl ProviderError {
    /// Build a service error; namespaced names keep only the part after `#`
    pub fn service(name: impl AsRef<str>, message: impl Into<String>) -> Self {
        let name = name.as_ref();
        let name = name.rsplit('#').next().unwrap_or(name);
        ProviderError::Service {
            name: name.to_string(),
            message: message.into(),
        }
    }

    /// Exception name for service errors
    pub fn name(&self) -> Option<&str> {
        match self {
            ProviderError::Service { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl From<ProviderError> for Error {
    fn from(error: ProviderError) -> Self {
        let message = error.to_string();
        match error.name() {
            Some("UserNotFoundException") => Error::UserNotFound(message),
            Some("NotAuthorizedException") => Error::WrongUsernameOrPassword(message),
            Some("UsernameExistsException") => Error::UserAlreadyExists(message),
            Some("UnauthorizedException") => Error::Unauthorized(message),
            Some("InvalidPasswordException") => Error::InvalidPassword(message),
            Some("ExpiredCodeException") | Some("CodeMismatchException") => {
                Error::InvalidOrExpiredCode(message)
            }
            Some("PasswordResetRequiredException") | Some("ForceChangePasswordException") => {
                Error::ForceChangePasswordRequired(message)
            }
            _ => Error::UnknownInternal(message),
        }
    }
}

impl From<StructureError> for Error {
    fn from(error: StructureError) -> Self {
        Error::InvalidParameter(error.to_string())
    }
}

//! Cognito Rust Library
//!
//! User self-service, administration and authentication services over a
//! Cognito user pool. The application describes its user attributes once with
//! a [`UserStructure`](attributes::UserStructure) and works with typed
//! records; the services take care of attribute conversion, pagination,
//! challenge flows and error classification.

pub mod admin;
pub mod auth;
pub mod config;
pub mod error;
pub mod factory;
pub mod fetch;
pub mod provider;
pub mod signing;
pub mod user;

pub use cognito_rust_attributes as attributes;

use std::sync::Arc;

use crate::admin::CognitoAdminService;
use crate::auth::CognitoAuthService;
use crate::config::CognitoConfig;
use crate::error::Result;
use crate::provider::{HttpIdentityProvider, IdentityProvider};
use crate::user::{CognitoUserService, UserAssembler};

pub use crate::error::Error;
pub use crate::factory::{create_admin_user_service, create_auth_service, create_user_service};

/// The main entry point: one user pool client shared by every service
#[derive(Clone)]
pub struct Cognito {
    config: CognitoConfig,
    provider: Arc<dyn IdentityProvider>,
}

impl Cognito {
    /// Create a new client for the configured user pool
    ///
    /// # Example
    ///
    /// ```
    /// use cognito_rust::{Cognito, config::CognitoConfig};
    ///
    /// let config = CognitoConfig::new("eu-west-1", "eu-west-1_AbCdEf", "app-client-id");
    /// let cognito = Cognito::new(config).unwrap();
    /// let auth = cognito.auth();
    /// ```
    pub fn new(config: CognitoConfig) -> Result<Self> {
        config.validate()?;
        let provider = Arc::new(HttpIdentityProvider::new(&config)?);
        Ok(Self { config, provider })
    }

    /// Create a client over an existing [`IdentityProvider`]
    pub fn with_provider(config: CognitoConfig, provider: Arc<dyn IdentityProvider>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, provider })
    }

    pub fn config(&self) -> &CognitoConfig {
        &self.config
    }

    pub fn auth(&self) -> CognitoAuthService {
        CognitoAuthService::new(
            Arc::clone(&self.provider),
            &self.config.user_pool_id,
            &self.config.client_id,
        )
    }

    /// Self-service operations for records of type `A`
    pub fn users<A: Default>(&self, assembler: UserAssembler<A>) -> CognitoUserService<A> {
        CognitoUserService::new(
            Arc::clone(&self.provider),
            &self.config.client_id,
            assembler,
        )
    }

    /// Administrative operations for records of type `A`
    pub fn admin<A: Default>(&self, assembler: UserAssembler<A>) -> CognitoAdminService<A> {
        CognitoAdminService::new(
            Arc::clone(&self.provider),
            &self.config.user_pool_id,
            assembler,
        )
        .with_list_limit(self.config.list_limit)
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::admin::{AdminUserService, CreateUserParams, SearchUsersParameters};
    pub use crate::attributes::{CognitoAttributeName, UserAttribute, UserStructure};
    pub use crate::auth::{AuthService, LoginResult, UserToken};
    pub use crate::config::CognitoConfig;
    pub use crate::error::Error;
    pub use crate::user::{Credentials, UserAssembler, UserService};
    pub use crate::Cognito;
}

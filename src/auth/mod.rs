//! Authentication for Cognito user pools
//!
//! Login, token refresh and challenge completion go through
//! [`AuthenticationManager`]; the remaining operations are single calls to
//! the user pool.

mod challenge;
mod token;
mod types;

use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use crate::error::Result;
use crate::provider::{
    AccessTokenRequest, ChangePasswordRequest, ClientUserRequest, ConfirmForgotPasswordRequest,
    IdentityProvider,
};
use crate::user::Credentials;

pub use challenge::{AuthStep, AuthenticationManager};
pub use token::username_from_token;
pub use types::*;

/// Login and credential operations
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Log in with username and password
    async fn login(&self, credentials: &Credentials) -> Result<LoginResult>;

    async fn refresh(&self, token: &RefreshAuthToken) -> Result<UserToken>;

    /// Revoke every token issued to the user
    async fn logout(&self, token: &UserToken) -> Result<()>;

    async fn update_credentials(
        &self,
        info: &UpdateCredentialsInfo,
        token: &UserToken,
    ) -> Result<()>;

    async fn resend_confirmation_link_by_email(&self, username: &str) -> Result<()>;

    async fn forgot_password(&self, username: &str) -> Result<()>;

    async fn reset_password(&self, data: &ResetPasswordData) -> Result<()>;

    /// Resume a login paused on a challenge
    async fn complete_auth_challenge(
        &self,
        completion: &AuthChallengeCompletion,
        options: &AuthChallengeOptions,
    ) -> Result<LoginResult>;
}

/// [`AuthService`] backed by a user pool app client
pub struct CognitoAuthService {
    provider: Arc<dyn IdentityProvider>,
    client_id: String,
    manager: AuthenticationManager,
}

impl CognitoAuthService {
    pub fn new(provider: Arc<dyn IdentityProvider>, user_pool_id: &str, client_id: &str) -> Self {
        let manager = AuthenticationManager::new(Arc::clone(&provider), user_pool_id, client_id);
        Self {
            provider,
            client_id: client_id.to_string(),
            manager,
        }
    }

    fn client_user_request(&self, username: &str) -> ClientUserRequest {
        ClientUserRequest {
            client_id: self.client_id.clone(),
            username: username.to_string(),
        }
    }
}

#[async_trait]
impl AuthService for CognitoAuthService {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResult> {
        debug!("login for {}", credentials.username);
        self.manager.login(credentials).await
    }

    async fn refresh(&self, token: &RefreshAuthToken) -> Result<UserToken> {
        self.manager.refresh(token).await
    }

    async fn logout(&self, token: &UserToken) -> Result<()> {
        self.provider
            .global_sign_out(AccessTokenRequest {
                access_token: token.access_token.clone(),
            })
            .await?;
        Ok(())
    }

    async fn update_credentials(
        &self,
        info: &UpdateCredentialsInfo,
        token: &UserToken,
    ) -> Result<()> {
        self.provider
            .change_password(ChangePasswordRequest {
                access_token: token.access_token.clone(),
                previous_password: info.old_password.clone(),
                proposed_password: info.new_password.clone(),
            })
            .await?;
        Ok(())
    }

    async fn resend_confirmation_link_by_email(&self, username: &str) -> Result<()> {
        self.provider
            .resend_confirmation_code(self.client_user_request(username))
            .await?;
        Ok(())
    }

    async fn forgot_password(&self, username: &str) -> Result<()> {
        self.provider
            .forgot_password(self.client_user_request(username))
            .await?;
        Ok(())
    }

    async fn reset_password(&self, data: &ResetPasswordData) -> Result<()> {
        self.provider
            .confirm_forgot_password(ConfirmForgotPasswordRequest {
                client_id: self.client_id.clone(),
                username: data.username.clone(),
                password: data.new_password.clone(),
                confirmation_code: data.confirmation_code.clone(),
            })
            .await?;
        Ok(())
    }

    async fn complete_auth_challenge(
        &self,
        completion: &AuthChallengeCompletion,
        options: &AuthChallengeOptions,
    ) -> Result<LoginResult> {
        self.manager.respond(completion, options).await
    }
}

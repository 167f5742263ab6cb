use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::{Credentials, UserAssembler, UserInfo};
use crate::auth::UserAuthToken;
use crate::error::{Error, Result};
use crate::provider::{
    AccessTokenRequest, ClientUserRequest, ConfirmSignUpRequest, IdentityProvider, SignUpRequest,
    UpdateUserAttributesRequest,
};

/// Self-service operations of an end user
#[async_trait]
pub trait UserService<A>: Send + Sync
where
    A: Send + Sync + 'static,
{
    async fn sign_up(&self, credentials: &Credentials, info: A) -> Result<()>;

    async fn confirm_sign_up(&self, username: &str, code: &str) -> Result<()>;

    async fn resend_confirmation_code(&self, username: &str) -> Result<()>;

    async fn get_user_info(&self, token: &UserAuthToken) -> Result<UserInfo<A>>;

    /// Update the attributes set on `info`; unset fields are left untouched
    async fn update_user_info(&self, token: &UserAuthToken, info: A) -> Result<()>;

    async fn delete_user(&self, token: &UserAuthToken) -> Result<()>;
}

/// [`UserService`] backed by a user pool app client
pub struct CognitoUserService<A> {
    provider: Arc<dyn IdentityProvider>,
    client_id: String,
    assembler: UserAssembler<A>,
}

impl<A: Default> CognitoUserService<A> {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        client_id: &str,
        assembler: UserAssembler<A>,
    ) -> Self {
        Self {
            provider,
            client_id: client_id.to_string(),
            assembler,
        }
    }
}

#[async_trait]
impl<A> UserService<A> for CognitoUserService<A>
where
    A: Default + Send + Sync + 'static,
{
    async fn sign_up(&self, credentials: &Credentials, info: A) -> Result<()> {
        debug!("sign up for {}", credentials.username);
        let user_attributes = self.assembler.sign_up_attributes(info);
        self.provider
            .sign_up(SignUpRequest {
                client_id: self.client_id.clone(),
                username: credentials.username.clone(),
                password: credentials.password.clone(),
                user_attributes,
            })
            .await?;
        Ok(())
    }

    async fn confirm_sign_up(&self, username: &str, code: &str) -> Result<()> {
        self.provider
            .confirm_sign_up(ConfirmSignUpRequest {
                client_id: self.client_id.clone(),
                username: username.to_string(),
                confirmation_code: code.to_string(),
            })
            .await?;
        Ok(())
    }

    async fn resend_confirmation_code(&self, username: &str) -> Result<()> {
        self.provider
            .resend_confirmation_code(ClientUserRequest {
                client_id: self.client_id.clone(),
                username: username.to_string(),
            })
            .await?;
        Ok(())
    }

    async fn get_user_info(&self, token: &UserAuthToken) -> Result<UserInfo<A>> {
        let response = self
            .provider
            .get_user(AccessTokenRequest {
                access_token: token.access_token.clone(),
            })
            .await?;
        let username = response
            .username
            .ok_or_else(|| Error::UserNotRetrieved("no username in response".to_string()))?;
        Ok(self.assembler.user_info(&username, response.user_attributes))
    }

    async fn update_user_info(&self, token: &UserAuthToken, info: A) -> Result<()> {
        let user_attributes = self.assembler.update_attributes(info);
        self.provider
            .update_user_attributes(UpdateUserAttributesRequest {
                access_token: token.access_token.clone(),
                user_attributes,
            })
            .await?;
        Ok(())
    }

    async fn delete_user(&self, token: &UserAuthToken) -> Result<()> {
        self.provider
            .delete_user(AccessTokenRequest {
                access_token: token.access_token.clone(),
            })
            .await?;
        Ok(())
    }
}

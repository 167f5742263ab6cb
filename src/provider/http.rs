use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use super::*;
use crate::config::CognitoConfig;
use crate::error::{Error, ProviderError};
use crate::fetch::FetchBuilder;
use crate::signing::{RequestSigner, COGNITO_SERVICE};

/// User pool client speaking the JSON 1.1 protocol over HTTP
pub struct HttpIdentityProvider {
    url: Url,
    http_client: Client,
    signer: Option<RequestSigner>,
}

impl HttpIdentityProvider {
    /// Create a new client from the configuration
    pub fn new(config: &CognitoConfig) -> Result<Self, Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| Error::invalid_parameter(format!("cannot build HTTP client: {}", e)))?;

        Self::with_client(config, http_client)
    }

    /// Create a new client reusing an existing `reqwest::Client`
    pub fn with_client(config: &CognitoConfig, http_client: Client) -> Result<Self, Error> {
        let url = Url::parse(&config.endpoint_url())
            .map_err(|e| Error::invalid_parameter(format!("invalid endpoint: {}", e)))?;
        let signer = config
            .credentials
            .clone()
            .map(|credentials| RequestSigner::new(credentials, &config.region, COGNITO_SERVICE));

        Ok(Self {
            url,
            http_client,
            signer,
        })
    }

    async fn call<Req, Resp>(&self, operation: &str, request: &Req) -> Result<Resp, ProviderError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        FetchBuilder::new(&self.http_client, &self.url, operation)
            .json(request)?
            .signed(self.signer.as_ref())
            .execute()
            .await
    }

    async fn call_empty<Req>(&self, operation: &str, request: &Req) -> Result<(), ProviderError>
    where
        Req: Serialize + Sync,
    {
        self.call::<Req, Empty>(operation, request).await.map(|_| ())
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_up(&self, request: SignUpRequest) -> ProviderResult<SignUpResponse> {
        self.call("SignUp", &request).await
    }

    async fn confirm_sign_up(&self, request: ConfirmSignUpRequest) -> ProviderResult<()> {
        self.call_empty("ConfirmSignUp", &request).await
    }

    async fn resend_confirmation_code(&self, request: ClientUserRequest) -> ProviderResult<()> {
        self.call_empty("ResendConfirmationCode", &request).await
    }

    async fn forgot_password(&self, request: ClientUserRequest) -> ProviderResult<()> {
        self.call_empty("ForgotPassword", &request).await
    }

    async fn confirm_forgot_password(
        &self,
        request: ConfirmForgotPasswordRequest,
    ) -> ProviderResult<()> {
        self.call_empty("ConfirmForgotPassword", &request).await
    }

    async fn get_user(&self, request: AccessTokenRequest) -> ProviderResult<GetUserResponse> {
        self.call("GetUser", &request).await
    }

    async fn update_user_attributes(
        &self,
        request: UpdateUserAttributesRequest,
    ) -> ProviderResult<()> {
        self.call_empty("UpdateUserAttributes", &request).await
    }

    async fn delete_user(&self, request: AccessTokenRequest) -> ProviderResult<()> {
        self.call_empty("DeleteUser", &request).await
    }

    async fn change_password(&self, request: ChangePasswordRequest) -> ProviderResult<()> {
        self.call_empty("ChangePassword", &request).await
    }

    async fn global_sign_out(&self, request: AccessTokenRequest) -> ProviderResult<()> {
        self.call_empty("GlobalSignOut", &request).await
    }

    async fn admin_initiate_auth(
        &self,
        request: AdminInitiateAuthRequest,
    ) -> ProviderResult<AuthFlowResponse> {
        self.call("AdminInitiateAuth", &request).await
    }

    async fn admin_respond_to_auth_challenge(
        &self,
        request: AdminRespondToAuthChallengeRequest,
    ) -> ProviderResult<AuthFlowResponse> {
        self.call("AdminRespondToAuthChallenge", &request).await
    }

    async fn admin_create_user(
        &self,
        request: AdminCreateUserRequest,
    ) -> ProviderResult<AdminCreateUserResponse> {
        self.call("AdminCreateUser", &request).await
    }

    async fn admin_get_user(
        &self,
        request: AdminUserRequest,
    ) -> ProviderResult<AdminGetUserResponse> {
        self.call("AdminGetUser", &request).await
    }

    async fn admin_update_user_attributes(
        &self,
        request: AdminUpdateUserAttributesRequest,
    ) -> ProviderResult<()> {
        self.call_empty("AdminUpdateUserAttributes", &request).await
    }

    async fn admin_delete_user(&self, request: AdminUserRequest) -> ProviderResult<()> {
        self.call_empty("AdminDeleteUser", &request).await
    }

    async fn admin_enable_user(&self, request: AdminUserRequest) -> ProviderResult<()> {
        self.call_empty("AdminEnableUser", &request).await
    }

    async fn admin_disable_user(&self, request: AdminUserRequest) -> ProviderResult<()> {
        self.call_empty("AdminDisableUser", &request).await
    }

    async fn admin_confirm_sign_up(&self, request: AdminUserRequest) -> ProviderResult<()> {
        self.call_empty("AdminConfirmSignUp", &request).await
    }

    async fn admin_set_user_password(
        &self,
        request: AdminSetUserPasswordRequest,
    ) -> ProviderResult<()> {
        self.call_empty("AdminSetUserPassword", &request).await
    }

    async fn admin_add_user_to_group(&self, request: AdminGroupRequest) -> ProviderResult<()> {
        self.call_empty("AdminAddUserToGroup", &request).await
    }

    async fn admin_remove_user_from_group(
        &self,
        request: AdminGroupRequest,
    ) -> ProviderResult<()> {
        self.call_empty("AdminRemoveUserFromGroup", &request).await
    }

    async fn admin_list_groups_for_user(
        &self,
        request: AdminListGroupsForUserRequest,
    ) -> ProviderResult<AdminListGroupsForUserResponse> {
        self.call("AdminListGroupsForUser", &request).await
    }

    async fn list_users(&self, request: ListUsersRequest) -> ProviderResult<ListUsersResponse> {
        self.call("ListUsers", &request).await
    }

    async fn list_users_in_group(
        &self,
        request: ListUsersInGroupRequest,
    ) -> ProviderResult<ListUsersInGroupResponse> {
        self.call("ListUsersInGroup", &request).await
    }
}

//! The user pool API as seen by the services
//!
//! [`IdentityProvider`] is the only seam between the services and the
//! network; [`HttpIdentityProvider`] implements it over the JSON 1.1 protocol.

mod http;
mod types;

use async_trait::async_trait;

use crate::error::ProviderError;

pub use http::HttpIdentityProvider;
pub use types::*;

/// Result type of provider calls
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Operations of the user pool consumed by the services
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, request: SignUpRequest) -> ProviderResult<SignUpResponse>;

    async fn confirm_sign_up(&self, request: ConfirmSignUpRequest) -> ProviderResult<()>;

    async fn resend_confirmation_code(&self, request: ClientUserRequest) -> ProviderResult<()>;

    async fn forgot_password(&self, request: ClientUserRequest) -> ProviderResult<()>;

    async fn confirm_forgot_password(
        &self,
        request: ConfirmForgotPasswordRequest,
    ) -> ProviderResult<()>;

    async fn get_user(&self, request: AccessTokenRequest) -> ProviderResult<GetUserResponse>;

    async fn update_user_attributes(
        &self,
        request: UpdateUserAttributesRequest,
    ) -> ProviderResult<()>;

    async fn delete_user(&self, request: AccessTokenRequest) -> ProviderResult<()>;

    async fn change_password(&self, request: ChangePasswordRequest) -> ProviderResult<()>;

    async fn global_sign_out(&self, request: AccessTokenRequest) -> ProviderResult<()>;

    async fn admin_initiate_auth(
        &self,
        request: AdminInitiateAuthRequest,
    ) -> ProviderResult<AuthFlowResponse>;

    async fn admin_respond_to_auth_challenge(
        &self,
        request: AdminRespondToAuthChallengeRequest,
    ) -> ProviderResult<AuthFlowResponse>;

    async fn admin_create_user(
        &self,
        request: AdminCreateUserRequest,
    ) -> ProviderResult<AdminCreateUserResponse>;

    async fn admin_get_user(&self, request: AdminUserRequest)
        -> ProviderResult<AdminGetUserResponse>;

    async fn admin_update_user_attributes(
        &self,
        request: AdminUpdateUserAttributesRequest,
    ) -> ProviderResult<()>;

    async fn admin_delete_user(&self, request: AdminUserRequest) -> ProviderResult<()>;

    async fn admin_enable_user(&self, request: AdminUserRequest) -> ProviderResult<()>;

    async fn admin_disable_user(&self, request: AdminUserRequest) -> ProviderResult<()>;

    async fn admin_confirm_sign_up(&self, request: AdminUserRequest) -> ProviderResult<()>;

    async fn admin_set_user_password(
        &self,
        request: AdminSetUserPasswordRequest,
    ) -> ProviderResult<()>;

    async fn admin_add_user_to_group(&self, request: AdminGroupRequest) -> ProviderResult<()>;

    async fn admin_remove_user_from_group(&self, request: AdminGroupRequest)
        -> ProviderResult<()>;

    async fn admin_list_groups_for_user(
        &self,
        request: AdminListGroupsForUserRequest,
    ) -> ProviderResult<AdminListGroupsForUserResponse>;

    async fn list_users(&self, request: ListUsersRequest) -> ProviderResult<ListUsersResponse>;

    async fn list_users_in_group(
        &self,
        request: ListUsersInGroupRequest,
    ) -> ProviderResult<ListUsersInGroupResponse>;
}

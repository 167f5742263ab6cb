//! Administrative user management
//!
//! Listings walk every page sequentially with the configured page size. Group
//! lookups are lenient: a failure is logged and reported as no groups.

mod search;
mod types;

use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

use cognito_rust_attributes::{ProviderAttribute, VerifiableAttribute};

use crate::config::COGNITO_LIST_LIMIT;
use crate::error::{Error, ProviderError, Result};
use crate::provider::{
    AdminCreateUserRequest, AdminGroupRequest, AdminListGroupsForUserRequest,
    AdminSetUserPasswordRequest, AdminUpdateUserAttributesRequest, AdminUserRequest,
    IdentityProvider, ListUsersInGroupRequest, ListUsersRequest, UserType,
};
use crate::user::{CompleteUserInfo, UserAssembler};

pub use search::*;
pub use types::*;

/// Operations of a user pool administrator
#[async_trait]
pub trait AdminUserService<A>: Send + Sync
where
    A: Send + Sync + 'static,
{
    async fn create_user(&self, params: CreateUserParams<A>) -> Result<CompleteUserInfo<A>>;

    /// Set a permanent password
    async fn set_user_password(&self, username: &str, password: &str) -> Result<()>;

    async fn update_user_password(
        &self,
        username: &str,
        password: &str,
        permanent: bool,
    ) -> Result<()>;

    async fn get_user(&self, username: &str) -> Result<CompleteUserInfo<A>>;

    /// Group names of a user; empty when the lookup fails
    async fn get_user_groups(&self, username: &str) -> Result<Vec<String>>;

    async fn update_user(&self, username: &str, info: A) -> Result<()>;

    async fn delete_user(&self, username: &str) -> Result<()>;

    async fn add_user_to_group(&self, username: &str, group: &str) -> Result<()>;

    async fn remove_user_from_group(&self, username: &str, group: &str) -> Result<()>;

    async fn disable_user(&self, username: &str) -> Result<()>;

    async fn enable_user(&self, username: &str) -> Result<()>;

    async fn get_all_users(&self) -> Result<Vec<CompleteUserInfo<A>>>;

    async fn search_users(&self, params: &SearchUsersParameters)
        -> Result<Vec<CompleteUserInfo<A>>>;

    async fn search_users_in_group(
        &self,
        group: &str,
        params: &SearchUsersParameters,
    ) -> Result<Vec<CompleteUserInfo<A>>>;

    async fn get_user_by_email(&self, email: &str) -> Result<CompleteUserInfo<A>>;

    async fn force_email_verification(&self, username: &str) -> Result<()>;

    async fn force_phone_number_verification(&self, username: &str) -> Result<()>;

    async fn confirm_sign_up(&self, username: &str) -> Result<()>;
}

/// [`AdminUserService`] backed by a user pool
pub struct CognitoAdminService<A> {
    provider: Arc<dyn IdentityProvider>,
    user_pool_id: String,
    list_limit: i32,
    assembler: UserAssembler<A>,
}

impl<A: Default> CognitoAdminService<A> {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        user_pool_id: &str,
        assembler: UserAssembler<A>,
    ) -> Self {
        Self {
            provider,
            user_pool_id: user_pool_id.to_string(),
            list_limit: COGNITO_LIST_LIMIT,
            assembler,
        }
    }

    /// Page size of listing calls
    pub fn with_list_limit(mut self, list_limit: i32) -> Self {
        self.list_limit = list_limit;
        self
    }

    fn user_request(&self, username: &str) -> AdminUserRequest {
        AdminUserRequest {
            user_pool_id: self.user_pool_id.clone(),
            username: username.to_string(),
        }
    }

    fn group_request(&self, username: &str, group: &str) -> AdminGroupRequest {
        AdminGroupRequest {
            user_pool_id: self.user_pool_id.clone(),
            username: username.to_string(),
            group_name: group.to_string(),
        }
    }

    async fn list_groups(&self, username: &str) -> std::result::Result<Vec<String>, ProviderError> {
        let mut groups = Vec::new();
        let mut next_token = None;
        loop {
            let response = self
                .provider
                .admin_list_groups_for_user(AdminListGroupsForUserRequest {
                    user_pool_id: self.user_pool_id.clone(),
                    username: username.to_string(),
                    limit: Some(self.list_limit),
                    next_token: next_token.take(),
                })
                .await?;
            groups.extend(response.groups.into_iter().filter_map(|g| g.group_name));
            match response.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }
        Ok(groups)
    }

    async fn groups_or_empty(&self, username: &str) -> Vec<String> {
        match self.list_groups(username).await {
            Ok(groups) => groups,
            Err(e) => {
                warn!("group lookup for {} failed, reporting none: {}", username, e);
                Vec::new()
            }
        }
    }

    async fn list_all_users(&self, filter: Option<String>) -> Result<Vec<UserType>> {
        let mut users = Vec::new();
        let mut pagination_token = None;
        loop {
            let response = self
                .provider
                .list_users(ListUsersRequest {
                    user_pool_id: self.user_pool_id.clone(),
                    limit: Some(self.list_limit),
                    pagination_token: pagination_token.take(),
                    filter: filter.clone(),
                })
                .await?;
            debug!("listed {} users", response.users.len());
            users.extend(response.users);
            match response.pagination_token {
                Some(token) if !token.is_empty() => pagination_token = Some(token),
                _ => break,
            }
        }
        Ok(users)
    }

    async fn list_all_users_in_group(&self, group: &str) -> Result<Vec<UserType>> {
        let mut users = Vec::new();
        let mut next_token = None;
        loop {
            let response = self
                .provider
                .list_users_in_group(ListUsersInGroupRequest {
                    user_pool_id: self.user_pool_id.clone(),
                    group_name: group.to_string(),
                    limit: Some(self.list_limit),
                    next_token: next_token.take(),
                })
                .await?;
            debug!("listed {} users of group {}", response.users.len(), group);
            users.extend(response.users);
            match response.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }
        Ok(users)
    }

    /// Listed users without a username or attributes are skipped
    async fn complete_users(
        &self,
        users: Vec<UserType>,
        include_groups: bool,
    ) -> Vec<CompleteUserInfo<A>> {
        let mut result = Vec::with_capacity(users.len());
        for user in users {
            let username = match (&user.username, &user.attributes) {
                (Some(username), Some(_)) => username.clone(),
                _ => continue,
            };
            let groups = if include_groups {
                self.groups_or_empty(&username).await
            } else {
                Vec::new()
            };
            if let Ok(user) = self.assembler.from_user_type(user, groups) {
                result.push(user);
            }
        }
        result
    }

    async fn force_attribute_verification(
        &self,
        username: &str,
        attribute: VerifiableAttribute,
    ) -> Result<()> {
        self.provider
            .admin_update_user_attributes(AdminUpdateUserAttributesRequest {
                user_pool_id: self.user_pool_id.clone(),
                username: username.to_string(),
                user_attributes: vec![verified(attribute)],
            })
            .await?;
        Ok(())
    }
}

fn verified(attribute: VerifiableAttribute) -> ProviderAttribute {
    ProviderAttribute::new(attribute.attribute_name().to_string(), "true")
}

#[async_trait]
impl<A> AdminUserService<A> for CognitoAdminService<A>
where
    A: Default + Send + Sync + 'static,
{
    async fn create_user(&self, params: CreateUserParams<A>) -> Result<CompleteUserInfo<A>> {
        let CreateUserParams {
            credentials,
            attributes,
            groups,
            post_signup_message,
            force_email_verification,
            force_phone_number_verification,
        } = params;

        let mut user_attributes = self.assembler.sign_up_attributes(attributes);
        if force_email_verification {
            user_attributes.push(verified(VerifiableAttribute::EmailVerified));
        }
        if force_phone_number_verification {
            user_attributes.push(verified(VerifiableAttribute::PhoneNumberVerified));
        }

        debug!("creating user {}", credentials.username);
        let response = self
            .provider
            .admin_create_user(AdminCreateUserRequest {
                user_pool_id: self.user_pool_id.clone(),
                username: credentials.username.clone(),
                temporary_password: credentials.password.clone(),
                user_attributes,
                message_action: post_signup_message
                    .action
                    .map(|action| action.as_str().to_string()),
                desired_delivery_mediums: post_signup_message.provider_mediums(),
            })
            .await?;

        for group in &groups {
            self.add_user_to_group(&credentials.username, group).await?;
        }

        let user = response
            .user
            .ok_or_else(|| Error::internal("created user missing from response"))?;
        self.assembler
            .from_user_type(user, groups)
            .map_err(|_| Error::internal("created user has no username or attributes"))
    }

    async fn set_user_password(&self, username: &str, password: &str) -> Result<()> {
        self.update_user_password(username, password, true).await
    }

    async fn update_user_password(
        &self,
        username: &str,
        password: &str,
        permanent: bool,
    ) -> Result<()> {
        self.provider
            .admin_set_user_password(AdminSetUserPasswordRequest {
                user_pool_id: self.user_pool_id.clone(),
                username: username.to_string(),
                password: password.to_string(),
                permanent,
            })
            .await?;
        Ok(())
    }

    async fn get_user(&self, username: &str) -> Result<CompleteUserInfo<A>> {
        let response = self
            .provider
            .admin_get_user(self.user_request(username))
            .await?;
        let user = UserType::from(response);
        let username = user
            .username
            .clone()
            .ok_or_else(|| Error::UserNotRetrieved(username.to_string()))?;
        let groups = self.groups_or_empty(&username).await;
        self.assembler.from_user_type(user, groups)
    }

    async fn get_user_groups(&self, username: &str) -> Result<Vec<String>> {
        Ok(self.groups_or_empty(username).await)
    }

    async fn update_user(&self, username: &str, info: A) -> Result<()> {
        let user_attributes = self.assembler.update_attributes(info);
        self.provider
            .admin_update_user_attributes(AdminUpdateUserAttributesRequest {
                user_pool_id: self.user_pool_id.clone(),
                username: username.to_string(),
                user_attributes,
            })
            .await?;
        Ok(())
    }

    async fn delete_user(&self, username: &str) -> Result<()> {
        self.provider
            .admin_delete_user(self.user_request(username))
            .await?;
        Ok(())
    }

    async fn add_user_to_group(&self, username: &str, group: &str) -> Result<()> {
        self.provider
            .admin_add_user_to_group(self.group_request(username, group))
            .await?;
        Ok(())
    }

    async fn remove_user_from_group(&self, username: &str, group: &str) -> Result<()> {
        self.provider
            .admin_remove_user_from_group(self.group_request(username, group))
            .await?;
        Ok(())
    }

    async fn disable_user(&self, username: &str) -> Result<()> {
        self.provider
            .admin_disable_user(self.user_request(username))
            .await?;
        Ok(())
    }

    async fn enable_user(&self, username: &str) -> Result<()> {
        self.provider
            .admin_enable_user(self.user_request(username))
            .await?;
        Ok(())
    }

    async fn get_all_users(&self) -> Result<Vec<CompleteUserInfo<A>>> {
        self.search_users(&SearchUsersParameters::default()).await
    }

    async fn search_users(
        &self,
        params: &SearchUsersParameters,
    ) -> Result<Vec<CompleteUserInfo<A>>> {
        let filter = params.filter.as_ref().map(|f| f.to_string());
        let users = self.list_all_users(filter).await?;
        Ok(self.complete_users(users, params.include_groups).await)
    }

    async fn search_users_in_group(
        &self,
        group: &str,
        params: &SearchUsersParameters,
    ) -> Result<Vec<CompleteUserInfo<A>>> {
        let mut users = self.list_all_users_in_group(group).await?;
        if let Some(filter) = &params.filter {
            users.retain(|user| filter.matches(user));
        }
        Ok(self.complete_users(users, params.include_groups).await)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<CompleteUserInfo<A>> {
        let filter = SearchUserFilter::equals(SearchableAttribute::Email, email);
        let response = self
            .provider
            .list_users(ListUsersRequest {
                user_pool_id: self.user_pool_id.clone(),
                limit: None,
                pagination_token: None,
                filter: Some(filter.to_string()),
            })
            .await?;

        let user = response
            .users
            .into_iter()
            .next()
            .ok_or_else(|| Error::user_not_found(email))?;
        let username = match (&user.username, &user.attributes) {
            (Some(username), Some(_)) => username.clone(),
            _ => return Err(Error::user_not_found(email)),
        };
        let groups = self.groups_or_empty(&username).await;
        self.assembler.from_user_type(user, groups)
    }

    async fn force_email_verification(&self, username: &str) -> Result<()> {
        self.force_attribute_verification(username, VerifiableAttribute::EmailVerified)
            .await
    }

    async fn force_phone_number_verification(&self, username: &str) -> Result<()> {
        self.force_attribute_verification(username, VerifiableAttribute::PhoneNumberVerified)
            .await
    }

    async fn confirm_sign_up(&self, username: &str) -> Result<()> {
        self.provider
            .admin_confirm_sign_up(self.user_request(username))
            .await?;
        Ok(())
    }
}

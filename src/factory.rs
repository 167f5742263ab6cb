//! Service construction from configuration

use std::sync::Arc;

use crate::admin::{AdminUserService, CognitoAdminService};
use crate::auth::{AuthService, CognitoAuthService};
use crate::config::{CognitoConfig, ProviderType};
use crate::error::Result;
use crate::provider::{HttpIdentityProvider, IdentityProvider};
use crate::user::{CognitoUserService, UserAssembler, UserService};

fn provider_for(config: &CognitoConfig) -> Result<Arc<dyn IdentityProvider>> {
    config.validate()?;
    match config.provider {
        ProviderType::Cognito => Ok(Arc::new(HttpIdentityProvider::new(config)?)),
    }
}

pub fn create_auth_service(config: &CognitoConfig) -> Result<Arc<dyn AuthService>> {
    let provider = provider_for(config)?;
    Ok(Arc::new(CognitoAuthService::new(
        provider,
        &config.user_pool_id,
        &config.client_id,
    )))
}

pub fn create_user_service<A>(
    config: &CognitoConfig,
    assembler: UserAssembler<A>,
) -> Result<Arc<dyn UserService<A>>>
where
    A: Default + Send + Sync + 'static,
{
    let provider = provider_for(config)?;
    Ok(Arc::new(CognitoUserService::new(
        provider,
        &config.client_id,
        assembler,
    )))
}

pub fn create_admin_user_service<A>(
    config: &CognitoConfig,
    assembler: UserAssembler<A>,
) -> Result<Arc<dyn AdminUserService<A>>>
where
    A: Default + Send + Sync + 'static,
{
    let provider = provider_for(config)?;
    Ok(Arc::new(
        CognitoAdminService::new(provider, &config.user_pool_id, assembler)
            .with_list_limit(config.list_limit),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_misconfiguration_is_invalid_parameter() {
        let config = CognitoConfig::new("eu-west-1", "", "client");
        assert!(matches!(
            create_auth_service(&config),
            Err(Error::InvalidParameter(_))
        ));

        let config = CognitoConfig::new("eu-west-1", "pool", "client").with_list_limit(0);
        assert!(matches!(
            create_auth_service(&config),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_valid_configuration_builds_services() {
        let config = CognitoConfig::new("eu-west-1", "eu-west-1_pool", "client");
        assert!(create_auth_service(&config).is_ok());
    }
}

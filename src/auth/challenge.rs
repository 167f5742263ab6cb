//! Multi-step login flows
//!
//! One attempt moves from initiation either straight to issued tokens or to a
//! pending challenge. A pending challenge is resumed with
//! [`AuthenticationManager::respond`], which may end the flow or raise the
//! next challenge. Each step is a single request to the user pool; nothing is
//! retried and no session state is kept here.

use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;

use super::types::*;
use crate::error::{Error, Result};
use crate::provider::{
    AdminInitiateAuthRequest, AdminRespondToAuthChallengeRequest, AuthFlowResponse, AuthFlowType,
    AuthenticationResult, IdentityProvider,
};
use crate::user::Credentials;

/// Where a login attempt stands after one exchange with the user pool
#[derive(Debug)]
pub enum AuthStep {
    /// Terminal: all three tokens were issued
    Completed(UserToken),
    /// Waiting for the caller to answer a challenge
    ChallengePending(AuthChallenge),
    /// Terminal
    Failed(Error),
}

impl AuthStep {
    /// Classify one user pool answer
    ///
    /// An authentication result wins over any challenge fields. A result
    /// without all three tokens, or a challenge that cannot be mapped, fails
    /// as unauthorized.
    pub fn from_output(output: AuthFlowResponse) -> Self {
        if let Some(result) = output.authentication_result {
            return match parse_user_token(result) {
                Some(token) => AuthStep::Completed(token),
                None => {
                    warn!("authentication result is missing tokens");
                    AuthStep::Failed(Error::unauthorized("incomplete authentication result"))
                }
            };
        }

        let provider_name = output.challenge_name.unwrap_or_default();
        match AuthChallengeName::from_provider(&provider_name) {
            Some(name) => AuthStep::ChallengePending(AuthChallenge {
                name,
                options: AuthChallengeOptions {
                    parameters: output.challenge_parameters,
                    session: output.session,
                },
            }),
            None => {
                warn!("unsupported authentication challenge: {:?}", provider_name);
                AuthStep::Failed(Error::unauthorized(format!(
                    "unsupported challenge {:?}",
                    provider_name
                )))
            }
        }
    }

    pub fn into_login_result(self) -> Result<LoginResult> {
        match self {
            AuthStep::Completed(token) => Ok(LoginResult::Token(token)),
            AuthStep::ChallengePending(auth_challenge) => {
                Ok(LoginResult::Challenge { auth_challenge })
            }
            AuthStep::Failed(error) => Err(error),
        }
    }
}

fn parse_user_token(result: AuthenticationResult) -> Option<UserToken> {
    match (result.access_token, result.id_token, result.refresh_token) {
        (Some(access_token), Some(id_token), Some(refresh_token)) => Some(UserToken {
            access_token,
            id_token,
            refresh_token,
        }),
        _ => None,
    }
}

/// Drives login, challenge completion and refresh against the user pool
#[derive(Clone)]
pub struct AuthenticationManager {
    provider: Arc<dyn IdentityProvider>,
    user_pool_id: String,
    client_id: String,
}

impl AuthenticationManager {
    pub fn new(provider: Arc<dyn IdentityProvider>, user_pool_id: &str, client_id: &str) -> Self {
        Self {
            provider,
            user_pool_id: user_pool_id.to_string(),
            client_id: client_id.to_string(),
        }
    }

    /// Start a flow and return the resulting step
    pub async fn initiate(
        &self,
        auth_flow: AuthFlowType,
        auth_parameters: HashMap<String, String>,
    ) -> AuthStep {
        debug!("initiating {:?}", auth_flow);
        let request = AdminInitiateAuthRequest {
            user_pool_id: self.user_pool_id.clone(),
            client_id: self.client_id.clone(),
            auth_flow,
            auth_parameters,
        };
        match self.provider.admin_initiate_auth(request).await {
            Ok(output) => AuthStep::from_output(output),
            Err(e) => AuthStep::Failed(e.into()),
        }
    }

    /// Answer a pending challenge and return the next step
    ///
    /// The responses are the echoed challenge parameters, then the fields
    /// the challenge itself needs, then `USERNAME`; later entries overwrite
    /// earlier ones.
    pub async fn respond_step(
        &self,
        completion: &AuthChallengeCompletion,
        options: &AuthChallengeOptions,
    ) -> AuthStep {
        let name = completion.name();
        let mut responses = options.parameters.clone();
        match completion {
            AuthChallengeCompletion::CustomChallenge { response, .. } => {
                responses.extend(response.clone());
            }
            AuthChallengeCompletion::NewPasswordRequired { new_password, .. } => {
                responses.insert("NEW_PASSWORD".to_string(), new_password.clone());
            }
        }
        responses.insert("USERNAME".to_string(), completion.username().to_string());

        debug!("responding to {}", name);
        let request = AdminRespondToAuthChallengeRequest {
            user_pool_id: self.user_pool_id.clone(),
            client_id: self.client_id.clone(),
            challenge_name: name.as_provider_str().to_string(),
            session: options.session.clone(),
            challenge_responses: responses,
        };
        match self.provider.admin_respond_to_auth_challenge(request).await {
            Ok(output) => AuthStep::from_output(output),
            Err(e) => AuthStep::Failed(e.into()),
        }
    }

    /// Username and password login
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResult> {
        let mut parameters = HashMap::new();
        parameters.insert("USERNAME".to_string(), credentials.username.clone());
        parameters.insert("PASSWORD".to_string(), credentials.password.clone());

        self.initiate(AuthFlowType::AdminUserPasswordAuth, parameters)
            .await
            .into_login_result()
    }

    pub async fn respond(
        &self,
        completion: &AuthChallengeCompletion,
        options: &AuthChallengeOptions,
    ) -> Result<LoginResult> {
        self.respond_step(completion, options)
            .await
            .into_login_result()
    }

    /// Exchange a refresh token for a new token set
    ///
    /// Refresh never pauses: a challenge here fails as unauthorized, and so
    /// does a result missing any of the three tokens.
    pub async fn refresh(&self, token: &RefreshAuthToken) -> Result<UserToken> {
        let mut parameters = HashMap::new();
        parameters.insert("REFRESH_TOKEN".to_string(), token.refresh_token.clone());

        debug!("initiating {:?}", AuthFlowType::RefreshTokenAuth);
        let request = AdminInitiateAuthRequest {
            user_pool_id: self.user_pool_id.clone(),
            client_id: self.client_id.clone(),
            auth_flow: AuthFlowType::RefreshTokenAuth,
            auth_parameters: parameters,
        };
        let output = self.provider.admin_initiate_auth(request).await?;

        match AuthStep::from_output(output) {
            AuthStep::Completed(token) => Ok(token),
            AuthStep::ChallengePending(challenge) => {
                warn!("refresh answered with challenge {}", challenge.name);
                Err(Error::unauthorized("refresh cannot complete a challenge"))
            }
            AuthStep::Failed(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(access: Option<&str>, id: Option<&str>, refresh: Option<&str>) -> AuthFlowResponse {
        AuthFlowResponse {
            authentication_result: Some(AuthenticationResult {
                access_token: access.map(str::to_string),
                id_token: id.map(str::to_string),
                refresh_token: refresh.map(str::to_string),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_result_issues_tokens() {
        let step = AuthStep::from_output(result(Some("a"), Some("i"), Some("r")));
        match step {
            AuthStep::Completed(token) => assert_eq!(token, UserToken::new("a", "i", "r")),
            other => panic!("unexpected step: {:?}", other),
        }
    }

    #[test]
    fn test_partial_result_is_unauthorized() {
        let partials = [
            result(None, Some("i"), Some("r")),
            result(Some("a"), None, Some("r")),
            result(Some("a"), Some("i"), None),
        ];
        for output in partials {
            let step = AuthStep::from_output(output);
            assert!(matches!(step, AuthStep::Failed(Error::Unauthorized(_))));
        }
    }

    #[test]
    fn test_mapped_challenge_is_pending() {
        let mut parameters = HashMap::new();
        parameters.insert("USER_ID_FOR_SRP".to_string(), "ada".to_string());
        let step = AuthStep::from_output(AuthFlowResponse {
            challenge_name: Some("NEW_PASSWORD_REQUIRED".to_string()),
            challenge_parameters: parameters.clone(),
            session: Some("session-1".to_string()),
            authentication_result: None,
        });

        match step {
            AuthStep::ChallengePending(challenge) => {
                assert_eq!(challenge.name, AuthChallengeName::NewPasswordRequired);
                assert_eq!(challenge.options.parameters, parameters);
                assert_eq!(challenge.options.session.as_deref(), Some("session-1"));
            }
            other => panic!("unexpected step: {:?}", other),
        }
    }

    #[test]
    fn test_unmapped_challenge_is_unauthorized() {
        for name in [Some("SMS_MFA".to_string()), None] {
            let step = AuthStep::from_output(AuthFlowResponse {
                challenge_name: name,
                session: Some("session-1".to_string()),
                ..Default::default()
            });
            assert!(matches!(step, AuthStep::Failed(Error::Unauthorized(_))));
        }
    }

    #[test]
    fn test_into_login_result() {
        let ok = AuthStep::Completed(UserToken::new("a", "i", "r"))
            .into_login_result()
            .unwrap();
        assert_eq!(ok.token(), Some(&UserToken::new("a", "i", "r")));

        let failed = AuthStep::Failed(Error::unauthorized("no")).into_login_result();
        assert!(matches!(failed, Err(Error::Unauthorized(_))));
    }
}

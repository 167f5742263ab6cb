//! Configuration options for the Cognito services

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::Error;

/// Largest page size accepted by the user listing operations
pub const COGNITO_LIST_LIMIT: i32 = 60;

/// Identity provider backing the services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    Cognito,
}

impl FromStr for ProviderType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cognito" => Ok(ProviderType::Cognito),
            other => Err(Error::invalid_parameter(format!(
                "unsupported provider type: {}",
                other
            ))),
        }
    }
}

/// Static AWS credentials used to sign administrative calls
#[derive(Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("session_token", &self.session_token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Configuration for the Cognito services
#[derive(Debug, Clone)]
pub struct CognitoConfig {
    /// The identity provider type
    pub provider: ProviderType,

    /// The AWS region hosting the user pool
    pub region: String,

    /// The user pool id
    pub user_pool_id: String,

    /// The app client id
    pub client_id: String,

    /// Endpoint override; defaults to the regional Cognito endpoint
    pub endpoint: Option<String>,

    /// Credentials for signed (administrative) calls
    pub credentials: Option<AwsCredentials>,

    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Page size used by user listings
    pub list_limit: i32,
}

impl CognitoConfig {
    pub fn new(region: &str, user_pool_id: &str, client_id: &str) -> Self {
        Self {
            provider: ProviderType::Cognito,
            region: region.to_string(),
            user_pool_id: user_pool_id.to_string(),
            client_id: client_id.to_string(),
            endpoint: None,
            credentials: None,
            request_timeout: Some(Duration::from_secs(30)),
            list_limit: COGNITO_LIST_LIMIT,
        }
    }

    /// Load the configuration from environment variables
    ///
    /// Reads `AUTH_PROVIDER` (default `cognito`), `AWS_REGION`,
    /// `COGNITO_USER_POOL_ID`, `COGNITO_CLIENT_ID`, `COGNITO_ENDPOINT`,
    /// `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and `AWS_SESSION_TOKEN`.
    pub fn from_env() -> Result<Self, Error> {
        let required = |name: &str| {
            env::var(name).map_err(|_| Error::invalid_parameter(format!("{} must be set", name)))
        };

        let provider = match env::var("AUTH_PROVIDER") {
            Ok(value) => value.parse()?,
            Err(_) => ProviderType::Cognito,
        };

        let mut config = Self::new(
            &required("AWS_REGION")?,
            &required("COGNITO_USER_POOL_ID")?,
            &required("COGNITO_CLIENT_ID")?,
        )
        .with_provider(provider);

        if let Ok(endpoint) = env::var("COGNITO_ENDPOINT") {
            config = config.with_endpoint(&endpoint);
        }

        if let (Ok(access_key_id), Ok(secret_access_key)) = (
            env::var("AWS_ACCESS_KEY_ID"),
            env::var("AWS_SECRET_ACCESS_KEY"),
        ) {
            config = config.with_credentials(AwsCredentials {
                access_key_id,
                secret_access_key,
                session_token: env::var("AWS_SESSION_TOKEN").ok(),
            });
        }

        Ok(config)
    }

    /// Set the provider type
    pub fn with_provider(mut self, value: ProviderType) -> Self {
        self.provider = value;
        self
    }

    /// Set the endpoint override
    pub fn with_endpoint(mut self, value: &str) -> Self {
        self.endpoint = Some(value.to_string());
        self
    }

    /// Set the signing credentials
    pub fn with_credentials(mut self, value: AwsCredentials) -> Self {
        self.credentials = Some(value);
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the listing page size
    pub fn with_list_limit(mut self, value: i32) -> Self {
        self.list_limit = value;
        self
    }

    /// The endpoint calls are sent to
    pub fn endpoint_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!("https://cognito-idp.{}.amazonaws.com/", self.region),
        }
    }

    /// Reject configurations the services cannot work with
    pub fn validate(&self) -> Result<(), Error> {
        if self.region.trim().is_empty() {
            return Err(Error::invalid_parameter("region must not be empty"));
        }
        if self.user_pool_id.trim().is_empty() {
            return Err(Error::invalid_parameter("user pool id must not be empty"));
        }
        if self.client_id.trim().is_empty() {
            return Err(Error::invalid_parameter("client id must not be empty"));
        }
        if !(1..=COGNITO_LIST_LIMIT).contains(&self.list_limit) {
            return Err(Error::invalid_parameter(format!(
                "list limit must be between 1 and {}",
                COGNITO_LIST_LIMIT
            )));
        }
        url::Url::parse(&self.endpoint_url())
            .map_err(|e| Error::invalid_parameter(format!("invalid endpoint: {}", e)))?;
        Ok(())
    }
}

//! HTTP client abstraction for making requests to the user pool API

use chrono::Utc;
use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

use crate::error::ProviderError;
use crate::signing::RequestSigner;

const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// Error body returned by the service on non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "__type", default)]
    kind: Option<String>,
    #[serde(default, alias = "Message")]
    message: Option<String>,
}

/// Helper for building and executing one JSON 1.1 protocol call
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: &'a Url,
    operation: &'a str,
    body: Option<Vec<u8>>,
    signer: Option<&'a RequestSigner>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder for `operation`
    pub fn new(client: &'a Client, url: &'a Url, operation: &'a str) -> Self {
        Self {
            client,
            url,
            operation,
            body: None,
            signer: None,
        }
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ProviderError> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }

    /// Sign the request when a signer is available
    pub fn signed(mut self, signer: Option<&'a RequestSigner>) -> Self {
        self.signer = signer;
        self
    }

    fn headers(&self, body: &[u8]) -> Result<HeaderMap, ProviderError> {
        let mut pairs = vec![
            ("content-type".to_string(), CONTENT_TYPE.to_string()),
            (
                "x-amz-target".to_string(),
                format!("{}.{}", TARGET_PREFIX, self.operation),
            ),
        ];
        if let Some(signer) = self.signer {
            let signed = signer.sign("POST", self.url, &pairs, body, Utc::now())?;
            pairs.extend(signed);
        }

        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ProviderError::Signing(e.to_string()))?;
            let value =
                HeaderValue::from_str(&value).map_err(|e| ProviderError::Signing(e.to_string()))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    /// Execute the request and parse the response as JSON
    pub async fn execute<T: DeserializeOwned>(self) -> Result<T, ProviderError> {
        let body = self.body.clone().unwrap_or_else(|| b"{}".to_vec());
        let headers = self.headers(&body)?;

        debug!("Calling {}", self.operation);
        let response = self
            .client
            .post(self.url.as_str())
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let error: ErrorBody = serde_json::from_str(&text).unwrap_or(ErrorBody {
                kind: None,
                message: None,
            });
            let name = error.kind.unwrap_or_else(|| format!("HTTP{}", status.as_u16()));
            let message = error.message.unwrap_or(text);
            debug!("{} failed with {}", self.operation, name);
            return Err(ProviderError::service(name, message));
        }

        // Operations without output answer with an empty body
        let text = if text.trim().is_empty() { "{}" } else { text.as_str() };
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use wiremock::matchers::{header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::AwsCredentials;

    #[tokio::test]
    async fn test_execute_sends_protocol_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("x-amz-target", "AWSCognitoIdentityProviderService.GetUser"))
            .and(header("content-type", "application/x-amz-json-1.1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Username": "ada"})))
            .mount(&mock_server)
            .await;

        let client = Client::new();
        let url = Url::parse(&mock_server.uri()).unwrap();
        let result: Value = FetchBuilder::new(&client, &url, "GetUser")
            .json(&json!({"AccessToken": "token"}))
            .unwrap()
            .execute()
            .await
            .unwrap();

        assert_eq!(result["Username"], "ada");
    }

    #[tokio::test]
    async fn test_execute_maps_error_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "__type": "UserNotFoundException",
                "message": "User does not exist."
            })))
            .mount(&mock_server)
            .await;

        let client = Client::new();
        let url = Url::parse(&mock_server.uri()).unwrap();
        let result = FetchBuilder::new(&client, &url, "AdminGetUser")
            .execute::<Value>()
            .await;

        match result {
            Err(ProviderError::Service { name, message }) => {
                assert_eq!(name, "UserNotFoundException");
                assert_eq!(message, "User does not exist.");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_accepts_empty_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = Client::new();
        let url = Url::parse(&mock_server.uri()).unwrap();
        let result = FetchBuilder::new(&client, &url, "AdminDeleteUser")
            .execute::<Value>()
            .await;

        assert_eq!(result.unwrap(), json!({}));
    }

    #[tokio::test]
    async fn test_signed_request_carries_authorization() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header_exists("authorization"))
            .and(header_exists("x-amz-date"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let signer = RequestSigner::new(
            AwsCredentials {
                access_key_id: "AKID".to_string(),
                secret_access_key: "secret".to_string(),
                session_token: None,
            },
            "eu-west-1",
            crate::signing::COGNITO_SERVICE,
        );
        let client = Client::new();
        let url = Url::parse(&mock_server.uri()).unwrap();
        let result = FetchBuilder::new(&client, &url, "AdminDisableUser")
            .signed(Some(&signer))
            .execute::<Value>()
            .await;

        assert!(result.is_ok());
    }
}

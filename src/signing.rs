//! AWS Signature Version 4 request signing

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use url::Url;

use crate::config::AwsCredentials;
use crate::error::ProviderError;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Signing service name for the user pool API
pub const COGNITO_SERVICE: &str = "cognito-idp";

/// Signs requests with static credentials for one region and service
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: AwsCredentials,
    region: String,
    service: String,
}

impl RequestSigner {
    pub fn new(credentials: AwsCredentials, region: &str, service: &str) -> Self {
        Self {
            credentials,
            region: region.to_string(),
            service: service.to_string(),
        }
    }

    /// Headers to add to the request so that it carries a valid signature
    ///
    /// `headers` are the headers already on the request; all of them are
    /// signed, together with `host` and `x-amz-date`.
    pub fn sign(
        &self,
        method: &str,
        url: &Url,
        headers: &[(String, String)],
        body: &[u8],
        now: DateTime<Utc>,
    ) -> Result<Vec<(String, String)>, ProviderError> {
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date = now.format("%Y%m%d").to_string();

        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => return Err(ProviderError::Signing(format!("no host in {}", url))),
        };

        let mut added = vec![("x-amz-date".to_string(), amz_date.clone())];
        if let Some(token) = &self.credentials.session_token {
            added.push(("x-amz-security-token".to_string(), token.clone()));
        }

        let mut canonical: Vec<(String, String)> = headers
            .iter()
            .chain(added.iter())
            .map(|(name, value)| (name.to_ascii_lowercase(), value.trim().to_string()))
            .collect();
        canonical.push(("host".to_string(), host));
        canonical.sort();

        let canonical_headers: String = canonical
            .iter()
            .map(|(name, value)| format!("{}:{}\n", name, value))
            .collect();
        let signed_headers = canonical
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(";");

        let path = if url.path().is_empty() { "/" } else { url.path() };
        let canonical_request = format!(
            "{}\n{}\n{}\n{}\n{}\n{}",
            method,
            path,
            canonical_query(url),
            canonical_headers,
            signed_headers,
            hex::encode(Sha256::digest(body)),
        );

        let scope = format!("{}/{}/{}/aws4_request", date, self.region, self.service);
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            ALGORITHM,
            amz_date,
            scope,
            hex::encode(Sha256::digest(canonical_request.as_bytes())),
        );

        let signing_key = self.signing_key(&date)?;
        let signature = hex::encode(hmac(&signing_key, string_to_sign.as_bytes())?);

        added.push((
            "authorization".to_string(),
            format!(
                "{} Credential={}/{}, SignedHeaders={}, Signature={}",
                ALGORITHM, self.credentials.access_key_id, scope, signed_headers, signature
            ),
        ));
        Ok(added)
    }

    fn signing_key(&self, date: &str) -> Result<Vec<u8>, ProviderError> {
        let secret = format!("AWS4{}", self.credentials.secret_access_key);
        let key = hmac(secret.as_bytes(), date.as_bytes())?;
        let key = hmac(&key, self.region.as_bytes())?;
        let key = hmac(&key, self.service.as_bytes())?;
        hmac(&key, b"aws4_request")
    }
}

fn hmac(key: &[u8], data: &[u8]) -> Result<Vec<u8>, ProviderError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| ProviderError::Signing(format!("invalid key: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn canonical_query(url: &Url) -> String {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (uri_encode(&k), uri_encode(&v)))
        .collect();
    pairs.sort();
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

fn uri_encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
        .replace('*', "%2A")
        .replace("%7E", "~")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn signer(session_token: Option<&str>) -> RequestSigner {
        RequestSigner::new(
            AwsCredentials {
                access_key_id: "AKIDEXAMPLE".to_string(),
                secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string(),
                session_token: session_token.map(str::to_string),
            },
            "us-east-1",
            COGNITO_SERVICE,
        )
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap()
    }

    fn header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
        headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_authorization_header_layout() {
        let url = Url::parse("https://cognito-idp.us-east-1.amazonaws.com/").unwrap();
        let headers = vec![(
            "X-Amz-Target".to_string(),
            "AWSCognitoIdentityProviderService.AdminGetUser".to_string(),
        )];

        let added = signer(None).sign("POST", &url, &headers, b"{}", now()).unwrap();

        assert_eq!(header(&added, "x-amz-date"), Some("20150830T123600Z"));
        let authorization = header(&added, "authorization").unwrap();
        assert!(authorization.starts_with(
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/cognito-idp/aws4_request, "
        ));
        assert!(authorization.contains("SignedHeaders=host;x-amz-date;x-amz-target, "));
        let signature = authorization.rsplit("Signature=").next().unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_signature_is_deterministic_and_body_sensitive() {
        let url = Url::parse("https://cognito-idp.us-east-1.amazonaws.com/").unwrap();
        let s = signer(None);

        let a = s.sign("POST", &url, &[], b"{\"a\":1}", now()).unwrap();
        let b = s.sign("POST", &url, &[], b"{\"a\":1}", now()).unwrap();
        let c = s.sign("POST", &url, &[], b"{\"a\":2}", now()).unwrap();

        assert_eq!(header(&a, "authorization"), header(&b, "authorization"));
        assert_ne!(header(&a, "authorization"), header(&c, "authorization"));
    }

    #[test]
    fn test_session_token_is_signed() {
        let url = Url::parse("http://localhost:9229/").unwrap();
        let added = signer(Some("session")).sign("POST", &url, &[], b"", now()).unwrap();

        assert_eq!(header(&added, "x-amz-security-token"), Some("session"));
        assert!(header(&added, "authorization")
            .unwrap()
            .contains("SignedHeaders=host;x-amz-date;x-amz-security-token, "));
    }

    #[test]
    fn test_canonical_query_is_sorted_and_encoded() {
        let url = Url::parse("https://example.com/?b=2&a=hello world&c=~x*").unwrap();
        assert_eq!(canonical_query(&url), "a=hello%20world&b=2&c=~x%2A");
    }
}

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    #[serde(rename = "cognito:username")]
    username: String,
}

/// Username carried by an ID token
///
/// The signature is not verified; the token is expected to come from a
/// completed login against the same user pool.
pub fn username_from_token(id_token: &str) -> Result<String> {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<IdTokenClaims>(id_token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims.username)
        .map_err(|e| Error::unauthorized(format!("invalid ID token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    #[test]
    fn test_username_from_token() {
        let token = encode(
            &Header::default(),
            &json!({ "cognito:username": "ada", "sub": "1234" }),
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert_eq!(username_from_token(&token).unwrap(), "ada");
    }

    #[test]
    fn test_missing_claim_or_garbage_is_unauthorized() {
        let token = encode(
            &Header::default(),
            &json!({ "sub": "1234" }),
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert!(matches!(
            username_from_token(&token),
            Err(Error::Unauthorized(_))
        ));
        assert!(matches!(
            username_from_token("not-a-token"),
            Err(Error::Unauthorized(_))
        ));
    }
}

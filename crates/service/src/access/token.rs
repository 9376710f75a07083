//! HS256 bearer tokens carrying the user id.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::errors::AccessError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

/// Sign a token for `user_id` valid for `ttl`.
pub fn issue_token(secret: &str, user_id: i32, ttl: Duration) -> Result<String, AccessError> {
    let now = Utc::now().timestamp().max(0) as usize;
    let claims = Claims { sub: user_id.to_string(), iat: now, exp: now + ttl.as_secs() as usize };
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AccessError::Token(e.to_string()))
}

/// Verify signature and expiry, returning the user id.
///
/// Every failure is `Unauthenticated`; the reason is not leaked to clients.
pub fn verify_token(secret: &str, token: &str) -> Result<i32, AccessError> {
    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::new(Algorithm::HS256))
        .map_err(|e| {
            tracing::debug!(error = %e, "token rejected");
            AccessError::Unauthenticated
        })?;
    data.claims.sub.parse::<i32>().map_err(|_| AccessError::Unauthenticated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies() {
        let t = issue_token("s3cret", 42, Duration::from_secs(60)).unwrap();
        assert_eq!(verify_token("s3cret", &t).unwrap(), 42);
    }

    #[test]
    fn wrong_secret_is_unauthenticated() {
        let t = issue_token("s3cret", 42, Duration::from_secs(60)).unwrap();
        assert!(matches!(verify_token("other", &t), Err(AccessError::Unauthenticated)));
    }

    #[test]
    fn expired_token_is_unauthenticated() {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims { sub: "5".into(), iat: now - 7200, exp: now - 3600 };
        let t = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"k")).unwrap();
        assert!(matches!(verify_token("k", &t), Err(AccessError::Unauthenticated)));
    }

    #[test]
    fn garbage_is_unauthenticated() {
        assert!(matches!(verify_token("k", "not.a.jwt"), Err(AccessError::Unauthenticated)));
    }
}

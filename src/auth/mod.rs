use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(username: impl Into<String>, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            username: username.into(),
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("JWT secret not configured")]
    InvalidSecret,
}

/// Sign a token for `username` valid for the configured number of hours
pub fn issue_token(security: &SecurityConfig, username: &str) -> Result<String, JwtError> {
    generate_jwt(&security.jwt_secret, &Claims::new(username, security.jwt_expiry_hours))
}

pub fn generate_jwt(secret: &str, claims: &Claims) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Verify signature and expiry, returning the decoded claims
pub fn validate_jwt(secret: &str, token: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_validates_with_same_secret() {
        let claims = Claims::new("alice", 24);
        let token = generate_jwt("s3cret", &claims).unwrap();

        let decoded = validate_jwt("s3cret", &token).unwrap();
        assert_eq!(decoded.username, "alice");
        assert_eq!(decoded.exp - decoded.iat, 24 * 60 * 60);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = generate_jwt("one", &Claims::new("alice", 1)).unwrap();
        assert!(matches!(validate_jwt("two", &token), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            username: "alice".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = generate_jwt("s3cret", &claims).unwrap();
        assert!(validate_jwt("s3cret", &token).is_err());
    }

    #[test]
    fn empty_secret_refuses_to_sign() {
        assert!(matches!(
            generate_jwt("", &Claims::new("alice", 1)),
            Err(JwtError::InvalidSecret)
        ));
    }
}

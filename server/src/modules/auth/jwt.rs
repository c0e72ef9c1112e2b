use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

static JWT_SECRET: OnceLock<String> = OnceLock::new();

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT encoding failed: {0}")]
    EncodingFailed(#[from] jsonwebtoken::errors::Error),
    #[error("JWT secret not initialized")]
    SecretNotInitialized,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id, stringified.
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: i32, role: &str, expiry_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(expiry_hours)).timestamp(),
        }
    }
}

/// First call wins; later calls are ignored.
pub fn init_jwt_secret(secret: &str) {
    let _ = JWT_SECRET.set(secret.to_string());
}

fn get_secret() -> Result<&'static str, JwtError> {
    JWT_SECRET
        .get()
        .map(|s| s.as_str())
        .ok_or(JwtError::SecretNotInitialized)
}

pub fn generate_token(user_id: i32, role: &str, expiry_hours: i64) -> Result<String, JwtError> {
    let secret = get_secret()?;
    let claims = Claims::new(user_id, role, expiry_hours);

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

pub fn validate_token(token: &str) -> Result<TokenData<Claims>, JwtError> {
    let secret = get_secret()?;

    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data)
}

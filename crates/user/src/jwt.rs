use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{UserError, UserResult};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub email: String,
    /// Expiration time as a UTC timestamp.
    pub exp: u64,
    /// Issued at as a UTC timestamp.
    pub iat: u64,
}

/// Generate an HS256 bearer token for a user.
pub fn generate_jwt(
    user_id: String,
    email: String,
    secret: &str,
    expiration_seconds: u64,
) -> UserResult<String> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| UserError::TokenError(e.to_string()))?
        .as_secs();

    let claims = Claims {
        sub: user_id,
        email,
        exp: now + expiration_seconds,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| UserError::TokenError(e.to_string()))
}

/// Validate and decode a bearer token.
pub fn validate_jwt(token: &str, secret: &str) -> UserResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| UserError::TokenError(e.to_string()))?;

    Ok(token_data.claims)
}

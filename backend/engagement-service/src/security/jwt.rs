/// JWT validation for Bearer tokens issued by the auth service (HS256)
///
/// This service never issues tokens; it only validates them and trusts the
/// `sub` claim as the acting user's id.
use anyhow::{anyhow, Result};
use jsonwebtoken::{decode, DecodingKey, TokenData, Validation};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

lazy_static! {
    static ref DECODING_KEY: RwLock<Option<DecodingKey>> = RwLock::new(None);
}

/// Install the shared HS256 secret. Must be called during startup before any
/// token validation.
pub fn initialize_secret(secret: &str) -> Result<()> {
    let mut key = DECODING_KEY
        .write()
        .map_err(|e| anyhow!("Failed to acquire write lock on JWT key: {}", e))?;
    *key = Some(DecodingKey::from_secret(secret.as_bytes()));
    Ok(())
}

pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    let key = {
        let guard = DECODING_KEY
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock on JWT key: {}", e))?;
        guard
            .clone()
            .ok_or_else(|| anyhow!("JWT secret not initialized. Call initialize_secret() during startup"))?
    };

    decode::<Claims>(token, &key, &Validation::default())
        .map_err(|e| anyhow!("Token validation failed: {}", e))
}

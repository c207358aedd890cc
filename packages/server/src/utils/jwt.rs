use anyhow::{Result, anyhow};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::models::auth::Identity;

/// JWT Claims structure: the caller's identity plus the time claims.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub identity: Identity,
    pub iat: i64, // Issued-at timestamp
    pub exp: i64, // Expiration timestamp
}

/// Sign a new JWT token carrying `identity`, valid for `ttl_hours`.
pub fn sign(identity: Identity, secret: &str, ttl_hours: i64) -> Result<String> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::hours(ttl_hours))
        .ok_or_else(|| anyhow!("token lifetime overflows the clock"))?;

    let claims = Claims {
        identity,
        iat: now.timestamp(),
        exp: expiration.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verify and decode a JWT token, returning the identity it was signed with.
pub fn verify(token: &str, secret: &str) -> Result<Identity> {
    // Identities may carry any claim, `aud` included; only signature and `exp` are checked.
    let mut validation = Validation::default();
    validation.validate_aud = false;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims.identity)
}

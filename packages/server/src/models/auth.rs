use serde_json::{Map, Value};

use crate::error::AppError;

/// Claims the signer manages itself; a caller-supplied identity may not carry them.
pub const RESERVED_CLAIMS: &[&str] = &["exp", "iat"];

/// Identity payload posted to `/jwt`. Any JSON object is accepted.
pub type Identity = Map<String, Value>;

pub fn validate_identity(identity: &Identity) -> Result<(), AppError> {
    if let Some(claim) = RESERVED_CLAIMS.iter().find(|c| identity.contains_key(**c)) {
        return Err(AppError::Validation(format!(
            "Identity payload must not contain \"{claim}\""
        )));
    }
    Ok(())
}

/// Email carried by a verified identity, if any.
pub fn identity_email(identity: &Identity) -> Option<&str> {
    identity.get("email").and_then(Value::as_str)
}

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;

use crate::error::AppError;
use crate::models::auth::{Identity, identity_email};
use crate::state::AppState;
use crate::utils::jwt;
use crate::utils::session::TOKEN_COOKIE;

/// Verified session identity, decoded from the `token` cookie.
///
/// Add this as a handler parameter to require a session.
pub struct AuthUser {
    pub identity: Identity,
}

impl AuthUser {
    pub fn email(&self) -> Option<&str> {
        identity_email(&self.identity)
    }

    /// Returns `Ok(())` if the session belongs to `email`, `Err(PermissionDenied)` otherwise.
    pub fn require_email(&self, email: Option<&str>) -> Result<(), AppError> {
        match (self.email(), email) {
            (Some(own), Some(requested)) if own == requested => Ok(()),
            _ => Err(AppError::PermissionDenied),
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(TOKEN_COOKIE)
            .map(|c| c.value())
            .filter(|v| !v.is_empty())
            .ok_or(AppError::TokenMissing)?;

        let identity = jwt::verify(token, &state.config.auth.jwt_secret).map_err(|e| {
            tracing::debug!(error = %e, "Session token rejected");
            AppError::TokenInvalid
        })?;

        Ok(AuthUser { identity })
    }
}

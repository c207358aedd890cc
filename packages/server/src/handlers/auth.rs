use axum::{Json, extract::State};
use axum_extra::extract::CookieJar;
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::auth::{Identity, identity_email, validate_identity};
use crate::models::shared::SuccessResponse;
use crate::state::AppState;
use crate::utils::jwt;
use crate::utils::session::{cleared_session_cookie, session_cookie};

#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Session",
    operation_id = "issueToken",
    summary = "Start a session",
    description = "Signs the posted identity object (any JSON object, usually carrying `email`) into a 72-hour token and sets it as the HTTP-only `token` cookie.",
    responses(
        (status = 200, description = "Cookie set", body = SuccessResponse),
        (status = 400, description = "Body is not a JSON object or carries `exp`/`iat` (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip_all, fields(email = identity_email(&identity).unwrap_or("-")))]
pub async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(identity): AppJson<Identity>,
) -> Result<(CookieJar, Json<SuccessResponse>), AppError> {
    validate_identity(&identity)?;

    let token = jwt::sign(
        identity,
        &state.config.auth.jwt_secret,
        state.config.auth.token_ttl_hours,
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    info!("Session token issued");
    let jar = jar.add(session_cookie(token, state.config.server.is_production()));

    Ok((jar, Json(SuccessResponse { success: true })))
}

#[utoipa::path(
    post,
    path = "/logout",
    tag = "Session",
    operation_id = "logout",
    summary = "End a session",
    description = "Overwrites the `token` cookie with an empty, immediately expiring one.",
    responses(
        (status = 200, description = "Cookie cleared", body = SuccessResponse),
    ),
)]
#[instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>) {
    info!("Clearing session cookie");
    let jar = jar.add(cleared_session_cookie(state.config.server.is_production()));
    (jar, Json(SuccessResponse { success: true }))
}

use axum::Json;
use axum::extract::{Path, Query, State};
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::shared::{DeleteOutcome, InsertOutcome};
use crate::models::wishlist::*;
use crate::state::AppState;

fn validate_new_entry(entry: &NewWishlistEntry) -> Result<(), AppError> {
    if entry.blog_id.trim().is_empty() {
        return Err(AppError::Validation("blog_id must not be empty".into()));
    }
    if entry.user_email.trim().is_empty() {
        return Err(AppError::Validation("user_email must not be empty".into()));
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/wishlist",
    tag = "Wishlist",
    operation_id = "addToWishlist",
    summary = "Save a blog post to a wishlist",
    description = "Stores the entry unless the owner already saved this post.",
    request_body = NewWishlistEntry,
    responses(
        (status = 200, description = "Entry stored", body = InsertOutcome),
        (status = 400, description = "Missing blog_id or user_email (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Already saved (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip_all, fields(blog_id = %payload.blog_id))]
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    AppJson(payload): AppJson<NewWishlistEntry>,
) -> Result<Json<InsertOutcome>, AppError> {
    validate_new_entry(&payload)?;
    Ok(Json(state.wishlist.add(payload).await?))
}

#[utoipa::path(
    get,
    path = "/wishlist",
    tag = "Wishlist",
    operation_id = "listWishlist",
    summary = "The caller's wishlist",
    description = "`email` must equal the email of the session identity.",
    params(OwnerQuery),
    responses(
        (status = 200, description = "Wishlist entries", body = [WishlistEntry]),
        (status = 401, description = "No valid session (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Email does not match the session (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("session" = [])),
)]
#[instrument(skip_all)]
pub async fn list_wishlist(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Vec<WishlistEntry>>, AppError> {
    let email = query.email.as_deref();
    auth_user.require_email(email)?;
    let email = email.unwrap_or_default();

    Ok(Json(state.wishlist.list_by_owner(email).await?))
}

#[utoipa::path(
    delete,
    path = "/wishlist/{id}",
    tag = "Wishlist",
    operation_id = "removeFromWishlist",
    summary = "Remove a post from a wishlist",
    description = "Deletes at most one entry for this owner and post. Not session-gated.",
    params(
        ("id" = String, Path, description = "Blog post id"),
        OwnerQuery,
    ),
    responses(
        (status = 200, description = "Delete result", body = DeleteOutcome),
        (status = 400, description = "Missing email (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip_all, fields(blog_id = %blog_id))]
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    Path(blog_id): Path<String>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<DeleteOutcome>, AppError> {
    let email = query
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| AppError::Validation("email query parameter is required".into()))?;

    let outcome = state.wishlist.remove(&email, &blog_id).await?;
    info!(deleted = outcome.deleted_count, "Wishlist entry removed");
    Ok(Json(outcome))
}

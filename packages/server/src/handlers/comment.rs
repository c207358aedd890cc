use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::comment::*;
use crate::models::shared::InsertOutcome;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/comments",
    tag = "Comments",
    operation_id = "createComment",
    summary = "Comment on a blog post",
    request_body = NewComment,
    responses(
        (status = 200, description = "Comment stored", body = InsertOutcome),
        (status = 400, description = "Malformed body (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip_all, fields(blog_id = %payload.blog_id))]
pub async fn create_comment(
    State(state): State<AppState>,
    AppJson(payload): AppJson<NewComment>,
) -> Result<Json<InsertOutcome>, AppError> {
    Ok(Json(state.comments.add_comment(payload).await?))
}

#[utoipa::path(
    get,
    path = "/comments/{id}",
    tag = "Comments",
    operation_id = "listComments",
    summary = "Comments on a blog post",
    description = "Newest first.",
    params(("id" = String, Path, description = "Blog post id")),
    responses(
        (status = 200, description = "Comments", body = [Comment]),
        (status = 401, description = "No valid session (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("session" = [])),
)]
#[instrument(skip_all, fields(blog_id = %blog_id))]
pub async fn list_comments(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(blog_id): Path<String>,
) -> Result<Json<Vec<Comment>>, AppError> {
    Ok(Json(state.comments.list_comments(&blog_id).await?))
}

#[utoipa::path(
    post,
    path = "/replies",
    tag = "Comments",
    operation_id = "createReply",
    summary = "Reply to a comment",
    request_body = NewReply,
    responses(
        (status = 200, description = "Reply stored", body = InsertOutcome),
        (status = 400, description = "Malformed body (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip_all, fields(comment_id = %payload.comment_id))]
pub async fn create_reply(
    State(state): State<AppState>,
    AppJson(payload): AppJson<NewReply>,
) -> Result<Json<InsertOutcome>, AppError> {
    Ok(Json(state.comments.add_reply(payload).await?))
}

#[utoipa::path(
    get,
    path = "/replies/{id}",
    tag = "Comments",
    operation_id = "listReplies",
    summary = "Replies to a comment",
    description = "Newest first.",
    params(("id" = String, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Replies", body = [Reply]),
        (status = 401, description = "No valid session (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("session" = [])),
)]
#[instrument(skip_all, fields(comment_id = %comment_id))]
pub async fn list_replies(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> Result<Json<Vec<Reply>>, AppError> {
    Ok(Json(state.comments.list_replies(&comment_id).await?))
}

use axum::Json;
use axum::extract::{Path, Query, State};
use tracing::{debug, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::blog::*;
use crate::models::shared::{InsertOutcome, UpdateOutcome, parse_object_id};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/blogs",
    tag = "Blogs",
    operation_id = "createBlog",
    summary = "Create a blog post",
    description = "Stores the submitted fields as a new post. Every field is optional.",
    request_body = BlogFields,
    responses(
        (status = 200, description = "Post created", body = InsertOutcome),
        (status = 400, description = "Malformed body (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip_all, fields(category = ?payload.category))]
pub async fn create_blog(
    State(state): State<AppState>,
    AppJson(payload): AppJson<BlogFields>,
) -> Result<Json<InsertOutcome>, AppError> {
    Ok(Json(state.blogs.create(payload).await?))
}

#[utoipa::path(
    get,
    path = "/blogs-count",
    tag = "Blogs",
    operation_id = "countBlogs",
    summary = "Count blog posts",
    description = "Counts posts with the exact `category` and a title containing `search` (case-insensitive). Blank parameters are ignored.",
    params(BlogCountQuery),
    responses(
        (status = 200, description = "Matching post count", body = CountResponse),
    ),
)]
#[instrument(skip_all)]
pub async fn count_blogs(
    State(state): State<AppState>,
    Query(query): Query<BlogCountQuery>,
) -> Result<Json<CountResponse>, AppError> {
    let filter = query.into_filter();
    let count = state.blogs.count(&filter).await?;
    debug!(?filter, count, "Counted blogs");
    Ok(Json(CountResponse { count }))
}

#[utoipa::path(
    get,
    path = "/blogs",
    tag = "Blogs",
    operation_id = "listBlogs",
    summary = "List blog posts",
    description = "Returns post summaries (no `long_description`) filtered by category, title search and author email, sorted by `posted_on` and paginated with `page` (0-based) and `size`.",
    params(BlogListQuery),
    responses(
        (status = 200, description = "Post summaries", body = [BlogSummary]),
    ),
)]
#[instrument(skip_all)]
pub async fn list_blogs(
    State(state): State<AppState>,
    Query(query): Query<BlogListQuery>,
) -> Result<Json<Vec<BlogSummary>>, AppError> {
    let (filter, page) = query.into_parts();
    debug!(?filter, ?page, "Listing blogs");
    Ok(Json(state.blogs.list(&filter, page).await?))
}

#[utoipa::path(
    get,
    path = "/blog/{id}",
    tag = "Blogs",
    operation_id = "getBlog",
    summary = "Get a blog post",
    description = "Returns the full post including its body, or `null` when no post has this id.",
    params(("id" = String, Path, description = "Hex post id")),
    responses(
        (status = 200, description = "The post, or `null` when missing", body = BlogPost),
        (status = 400, description = "Malformed id (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "No valid session (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("session" = [])),
)]
#[instrument(skip_all, fields(id = %id))]
pub async fn get_blog(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<BlogPost>>, AppError> {
    let id = parse_object_id(&id)?;
    Ok(Json(state.blogs.get(id).await?))
}

#[utoipa::path(
    patch,
    path = "/blog/{id}",
    tag = "Blogs",
    operation_id = "upsertBlog",
    summary = "Update or create a blog post",
    description = "Sets the submitted fields on the post, creating it under this id when it does not exist. Last write wins.",
    params(("id" = String, Path, description = "Hex post id")),
    request_body = BlogFields,
    responses(
        (status = 200, description = "Update result", body = UpdateOutcome),
        (status = 400, description = "Malformed id or no fields (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip_all, fields(id = %id))]
pub async fn upsert_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<BlogFields>,
) -> Result<Json<UpdateOutcome>, AppError> {
    let id = parse_object_id(&id)?;
    Ok(Json(state.blogs.upsert(id, payload).await?))
}

#[utoipa::path(
    get,
    path = "/featured-blogs",
    tag = "Blogs",
    operation_id = "featuredBlogs",
    summary = "Top posts by length",
    description = "The ten posts with the most words in their body, longest first, numbered by `serial` from 1.",
    responses(
        (status = 200, description = "Ranked posts", body = [FeaturedBlog]),
    ),
)]
#[instrument(skip_all)]
pub async fn featured_blogs(
    State(state): State<AppState>,
) -> Result<Json<Vec<FeaturedBlog>>, AppError> {
    Ok(Json(state.blogs.featured(FEATURED_LIMIT).await?))
}

#[utoipa::path(
    post,
    path = "/wishlist-blogs",
    tag = "Wishlist",
    operation_id = "wishlistBlogs",
    summary = "Resolve wishlist posts",
    description = "Takes a JSON array of hex post ids and returns the full posts, sorted by title. Unknown ids are skipped.",
    request_body = Vec<String>,
    responses(
        (status = 200, description = "Posts", body = [BlogPost]),
        (status = 400, description = "Malformed id (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "No valid session (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("session" = [])),
)]
#[instrument(skip_all, fields(count = ids.len()))]
pub async fn wishlist_blogs(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(ids): AppJson<Vec<String>>,
) -> Result<Json<Vec<BlogPost>>, AppError> {
    let ids = ids
        .iter()
        .map(|id| parse_object_id(id))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(state.blogs.find_by_ids(&ids).await?))
}

pub mod config;
pub mod database;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::state::AppState;
use crate::utils::session::TOKEN_COOKIE;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog Platform API",
        version = "1.0.0",
        description = "Blog posts, comments, replies and wishlists behind a cookie session"
    ),
    paths(
        handlers::health::liveness,
        handlers::auth::issue_token,
        handlers::auth::logout,
        handlers::blog::create_blog,
        handlers::blog::count_blogs,
        handlers::blog::list_blogs,
        handlers::blog::get_blog,
        handlers::blog::upsert_blog,
        handlers::blog::featured_blogs,
        handlers::blog::wishlist_blogs,
        handlers::comment::create_comment,
        handlers::comment::list_comments,
        handlers::comment::create_reply,
        handlers::comment::list_replies,
        handlers::wishlist::add_to_wishlist,
        handlers::wishlist::list_wishlist,
        handlers::wishlist::remove_from_wishlist,
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Session", description = "Session cookie issue and removal"),
        (name = "Blogs", description = "Blog post storage and queries"),
        (name = "Comments", description = "Comments and replies"),
        (name = "Wishlist", description = "Per-user saved posts"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "session",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(TOKEN_COOKIE))),
        );
    }
}

/// CORS for the configured front-end origins, with credentials so the
/// session cookie travels.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(config.max_age))
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let api = ApiDoc::openapi();
    let cors = cors_layer(&state.config.server.cors);

    routes::api_routes()
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
        .layer(cors)
}

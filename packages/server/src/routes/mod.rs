use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::health::liveness))
        .merge(session_routes())
        .merge(blog_routes())
        .merge(comment_routes())
        .merge(wishlist_routes())
}

fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/jwt", post(handlers::auth::issue_token))
        .route("/logout", post(handlers::auth::logout))
}

fn blog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/blogs",
            get(handlers::blog::list_blogs).post(handlers::blog::create_blog),
        )
        .route("/blogs-count", get(handlers::blog::count_blogs))
        .route(
            "/blog/{id}",
            get(handlers::blog::get_blog).patch(handlers::blog::upsert_blog),
        )
        .route("/featured-blogs", get(handlers::blog::featured_blogs))
}

fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments", post(handlers::comment::create_comment))
        .route("/comments/{id}", get(handlers::comment::list_comments))
        .route("/replies", post(handlers::comment::create_reply))
        .route("/replies/{id}", get(handlers::comment::list_replies))
}

fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/wishlist",
            get(handlers::wishlist::list_wishlist).post(handlers::wishlist::add_to_wishlist),
        )
        .route(
            "/wishlist/{id}",
            delete(handlers::wishlist::remove_from_wishlist),
        )
        .route("/wishlist-blogs", post(handlers::blog::wishlist_blogs))
}

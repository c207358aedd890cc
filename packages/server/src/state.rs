use std::sync::Arc;

use crate::config::AppConfig;
use crate::repository::{BlogRepository, CommentRepository, Repositories, WishlistRepository};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub blogs: Arc<dyn BlogRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub wishlist: Arc<dyn WishlistRepository>,
}

impl AppState {
    pub fn new(config: AppConfig, repos: Repositories) -> Self {
        Self {
            config,
            blogs: repos.blogs,
            comments: repos.comments,
            wishlist: repos.wishlist,
        }
    }
}

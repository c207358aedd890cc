//! Storage access for blogs, comments, replies and wishlists.
//!
//! Each collection sits behind an object-safe trait so handlers stay agnostic
//! of the backend. [`Repositories::mongo`] is the production wiring;
//! [`Repositories::in_memory`] keeps everything in process.

mod documents;
pub mod memory;
pub mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::models::blog::{
    BlogFields, BlogFilter, BlogPost, BlogSummary, FeaturedBlog, PageRequest,
};
use crate::models::comment::{Comment, NewComment, NewReply, Reply};
use crate::models::shared::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use crate::models::wishlist::{NewWishlistEntry, WishlistEntry};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Document encoding error: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),

    #[error("Document decoding error: {0}")]
    Decode(#[from] mongodb::bson::de::Error),

    #[error("Blog is already in the wishlist")]
    DuplicateWishlistEntry,

    #[error("Update contains no fields")]
    EmptyUpdate,

    #[error("Unexpected inserted id: {0}")]
    UnexpectedId(String),
}

pub type RepoResult<T> = Result<T, RepoError>;

#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn create(&self, fields: BlogFields) -> RepoResult<InsertOutcome>;

    async fn count(&self, filter: &BlogFilter) -> RepoResult<u64>;

    /// Summaries sorted by `posted_on`, then paginated.
    async fn list(&self, filter: &BlogFilter, page: PageRequest) -> RepoResult<Vec<BlogSummary>>;

    async fn get(&self, id: ObjectId) -> RepoResult<Option<BlogPost>>;

    /// `$set` the given fields, creating the post when `id` is unknown.
    async fn upsert(&self, id: ObjectId, fields: BlogFields) -> RepoResult<UpdateOutcome>;

    /// Top `limit` posts by body word count, ranked from 1.
    async fn featured(&self, limit: usize) -> RepoResult<Vec<FeaturedBlog>>;

    /// Full posts for `ids`, sorted by title.
    async fn find_by_ids(&self, ids: &[ObjectId]) -> RepoResult<Vec<BlogPost>>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn add_comment(&self, comment: NewComment) -> RepoResult<InsertOutcome>;

    /// Comments on `blog_id`, newest first.
    async fn list_comments(&self, blog_id: &str) -> RepoResult<Vec<Comment>>;

    async fn add_reply(&self, reply: NewReply) -> RepoResult<InsertOutcome>;

    /// Replies to `comment_id`, newest first.
    async fn list_replies(&self, comment_id: &str) -> RepoResult<Vec<Reply>>;
}

#[async_trait]
pub trait WishlistRepository: Send + Sync {
    /// Fails with [`RepoError::DuplicateWishlistEntry`] if the owner already saved the blog.
    async fn add(&self, entry: NewWishlistEntry) -> RepoResult<InsertOutcome>;

    async fn list_by_owner(&self, email: &str) -> RepoResult<Vec<WishlistEntry>>;

    /// Remove at most one entry matching owner and blog.
    async fn remove(&self, email: &str, blog_id: &str) -> RepoResult<DeleteOutcome>;
}

/// The repository set handed to the router.
#[derive(Clone)]
pub struct Repositories {
    pub blogs: Arc<dyn BlogRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub wishlist: Arc<dyn WishlistRepository>,
}

impl Repositories {
    pub fn mongo(db: &mongodb::Database) -> Self {
        Self {
            blogs: Arc::new(mongo::MongoBlogs::new(db)),
            comments: Arc::new(mongo::MongoComments::new(db)),
            wishlist: Arc::new(mongo::MongoWishlist::new(db)),
        }
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(memory::MemoryStore::default());
        Self {
            blogs: store.clone(),
            comments: store.clone(),
            wishlist: store,
        }
    }
}

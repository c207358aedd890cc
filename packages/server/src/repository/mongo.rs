use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Document, doc, from_document, oid::ObjectId, to_document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::results::InsertOneResult;
use mongodb::{Collection, Database};

use super::documents::{
    BlogDocument, CommentDocument, FeaturedDocument, ReplyDocument, WishlistDocument,
};
use super::{
    BlogRepository, CommentRepository, RepoError, RepoResult, WishlistRepository,
};
use crate::models::blog::{
    BlogFields, BlogFilter, BlogPost, BlogSummary, FeaturedBlog, PageRequest, assign_serials,
};
use crate::models::comment::{Comment, NewComment, NewReply, Reply};
use crate::models::shared::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use crate::models::wishlist::{NewWishlistEntry, WishlistEntry};

pub const BLOGS: &str = "blogs";
pub const COMMENTS: &str = "comments";
pub const REPLIES: &str = "replies";
pub const WISHLIST: &str = "wishlist";

/// MongoDB server error code for unique index violations.
const DUPLICATE_KEY: i32 = 11000;

fn inserted(result: InsertOneResult) -> RepoResult<InsertOutcome> {
    result
        .inserted_id
        .as_object_id()
        .map(InsertOutcome::new)
        .ok_or_else(|| RepoError::UnexpectedId(result.inserted_id.to_string()))
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref e)) if e.code == DUPLICATE_KEY
    )
}

fn blog_query(filter: &BlogFilter) -> Document {
    let mut query = Document::new();
    if let Some(ref category) = filter.category {
        query.insert("category", category.clone());
    }
    if let Some(ref search) = filter.search {
        query.insert(
            "blog_title",
            doc! { "$regex": regex::escape(search), "$options": "i" },
        );
    }
    if let Some(ref email) = filter.author_email {
        query.insert("blogger_email", email.clone());
    }
    query
}

pub struct MongoBlogs {
    blogs: Collection<BlogDocument>,
}

impl MongoBlogs {
    pub fn new(db: &Database) -> Self {
        Self {
            blogs: db.collection(BLOGS),
        }
    }
}

#[async_trait]
impl BlogRepository for MongoBlogs {
    async fn create(&self, fields: BlogFields) -> RepoResult<InsertOutcome> {
        let result = self.blogs.insert_one(BlogDocument::from(fields)).await?;
        inserted(result)
    }

    async fn count(&self, filter: &BlogFilter) -> RepoResult<u64> {
        Ok(self.blogs.count_documents(blog_query(filter)).await?)
    }

    async fn list(&self, filter: &BlogFilter, page: PageRequest) -> RepoResult<Vec<BlogSummary>> {
        let mut find = self
            .blogs
            .find(blog_query(filter))
            .sort(doc! { "posted_on": page.sort.as_mongo() })
            .projection(doc! { "long_description": 0 });

        if let Some(size) = page.size {
            let size_limit = i64::try_from(size).unwrap_or(i64::MAX);
            find = find.skip(page.page.saturating_mul(size)).limit(size_limit);
        }

        let docs: Vec<BlogDocument> = find.await?.try_collect().await?;
        docs.into_iter()
            .map(|d| d.into_post().map(BlogSummary::from))
            .collect()
    }

    async fn get(&self, id: ObjectId) -> RepoResult<Option<BlogPost>> {
        self.blogs
            .find_one(doc! { "_id": id })
            .await?
            .map(BlogDocument::into_post)
            .transpose()
    }

    async fn upsert(&self, id: ObjectId, fields: BlogFields) -> RepoResult<UpdateOutcome> {
        let set = to_document(&BlogDocument::from(fields))?;
        if set.is_empty() {
            return Err(RepoError::EmptyUpdate);
        }

        let result = self
            .blogs
            .update_one(doc! { "_id": id }, doc! { "$set": set })
            .upsert(true)
            .await?;

        let upserted_id = result
            .upserted_id
            .and_then(|id| id.as_object_id())
            .map(|id| id.to_hex());

        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(upserted_id.is_some()),
            upserted_id,
        })
    }

    async fn featured(&self, limit: usize) -> RepoResult<Vec<FeaturedBlog>> {
        let body = doc! { "$ifNull": ["$long_description", ""] };
        let pipeline = vec![
            doc! {
                "$project": {
                    "blog_title": 1,
                    "posted_on": 1,
                    "posted_by": 1,
                    "blogger_photo": 1,
                    "blogger_email": 1,
                    "image": 1,
                    "total_characters": { "$strLenCP": body.clone() },
                    "word_count": { "$size": { "$split": [body, " "] } },
                }
            },
            doc! { "$sort": { "word_count": -1 } },
            doc! { "$limit": i64::try_from(limit).unwrap_or(i64::MAX) },
        ];

        let docs: Vec<Document> = self.blogs.aggregate(pipeline).await?.try_collect().await?;
        let mut blogs = docs
            .into_iter()
            .map(|d| from_document::<FeaturedDocument>(d).map(FeaturedBlog::from))
            .collect::<Result<Vec<_>, _>>()?;
        assign_serials(&mut blogs);

        Ok(blogs)
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> RepoResult<Vec<BlogPost>> {
        let docs: Vec<BlogDocument> = self
            .blogs
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .sort(doc! { "blog_title": 1 })
            .await?
            .try_collect()
            .await?;

        docs.into_iter().map(BlogDocument::into_post).collect()
    }
}

pub struct MongoComments {
    comments: Collection<CommentDocument>,
    replies: Collection<ReplyDocument>,
}

impl MongoComments {
    pub fn new(db: &Database) -> Self {
        Self {
            comments: db.collection(COMMENTS),
            replies: db.collection(REPLIES),
        }
    }
}

#[async_trait]
impl CommentRepository for MongoComments {
    async fn add_comment(&self, comment: NewComment) -> RepoResult<InsertOutcome> {
        let result = self.comments.insert_one(CommentDocument::from(comment)).await?;
        inserted(result)
    }

    async fn list_comments(&self, blog_id: &str) -> RepoResult<Vec<Comment>> {
        let docs: Vec<CommentDocument> = self
            .comments
            .find(doc! { "blog_id": blog_id })
            .sort(doc! { "commented_on": -1 })
            .await?
            .try_collect()
            .await?;

        docs.into_iter().map(CommentDocument::into_comment).collect()
    }

    async fn add_reply(&self, reply: NewReply) -> RepoResult<InsertOutcome> {
        let result = self.replies.insert_one(ReplyDocument::from(reply)).await?;
        inserted(result)
    }

    async fn list_replies(&self, comment_id: &str) -> RepoResult<Vec<Reply>> {
        let docs: Vec<ReplyDocument> = self
            .replies
            .find(doc! { "comment_id": comment_id })
            .sort(doc! { "replied_on": -1 })
            .await?
            .try_collect()
            .await?;

        docs.into_iter().map(ReplyDocument::into_reply).collect()
    }
}

pub struct MongoWishlist {
    wishlist: Collection<WishlistDocument>,
}

impl MongoWishlist {
    pub fn new(db: &Database) -> Self {
        Self {
            wishlist: db.collection(WISHLIST),
        }
    }
}

#[async_trait]
impl WishlistRepository for MongoWishlist {
    async fn add(&self, entry: NewWishlistEntry) -> RepoResult<InsertOutcome> {
        let key = doc! {
            "blog_id": entry.blog_id.clone(),
            "user_email": entry.user_email.clone(),
        };
        if self.wishlist.find_one(key).await?.is_some() {
            return Err(RepoError::DuplicateWishlistEntry);
        }

        // The unique index catches requests that raced past the check above.
        match self.wishlist.insert_one(WishlistDocument::from(entry)).await {
            Ok(result) => inserted(result),
            Err(e) if is_duplicate_key(&e) => Err(RepoError::DuplicateWishlistEntry),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_by_owner(&self, email: &str) -> RepoResult<Vec<WishlistEntry>> {
        let docs: Vec<WishlistDocument> = self
            .wishlist
            .find(doc! { "user_email": email })
            .await?
            .try_collect()
            .await?;

        docs.into_iter().map(WishlistDocument::into_entry).collect()
    }

    async fn remove(&self, email: &str, blog_id: &str) -> RepoResult<DeleteOutcome> {
        let result = self
            .wishlist
            .delete_one(doc! { "user_email": email, "blog_id": blog_id })
            .await?;

        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }
}

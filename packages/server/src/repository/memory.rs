use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{
    BlogRepository, CommentRepository, RepoError, RepoResult, WishlistRepository,
};
use crate::models::blog::{
    BlogFields, BlogFilter, BlogPost, BlogSummary, FeaturedBlog, PageRequest, SortOrder,
    assign_serials,
};
use crate::models::comment::{Comment, NewComment, NewReply, Reply};
use crate::models::shared::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use crate::models::wishlist::{NewWishlistEntry, WishlistEntry};

/// In-process collections with the same query semantics as the Mongo backend.
///
/// Collections keep insertion order, which makes ties in sort keys stable.
#[derive(Default)]
pub struct MemoryStore {
    blogs: RwLock<Vec<BlogPost>>,
    comments: RwLock<Vec<Comment>>,
    replies: RwLock<Vec<Reply>>,
    wishlist: RwLock<Vec<WishlistEntry>>,
}

#[async_trait]
impl BlogRepository for MemoryStore {
    async fn create(&self, fields: BlogFields) -> RepoResult<InsertOutcome> {
        let id = ObjectId::new();
        self.blogs.write().await.push(BlogPost { id, fields });
        Ok(InsertOutcome::new(id))
    }

    async fn count(&self, filter: &BlogFilter) -> RepoResult<u64> {
        let blogs = self.blogs.read().await;
        Ok(blogs.iter().filter(|b| filter.matches(&b.fields)).count() as u64)
    }

    async fn list(&self, filter: &BlogFilter, page: PageRequest) -> RepoResult<Vec<BlogSummary>> {
        let blogs = self.blogs.read().await;
        let mut matched: Vec<&BlogPost> = blogs.iter().filter(|b| filter.matches(&b.fields)).collect();

        // Missing dates sort lowest, as in MongoDB.
        matched.sort_by(|a, b| match page.sort {
            SortOrder::Asc => a.fields.posted_on.cmp(&b.fields.posted_on),
            SortOrder::Desc => b.fields.posted_on.cmp(&a.fields.posted_on),
        });

        let (skip, take) = match page.size {
            Some(size) => (
                usize::try_from(page.page.saturating_mul(size)).unwrap_or(usize::MAX),
                usize::try_from(size).unwrap_or(usize::MAX),
            ),
            None => (0, usize::MAX),
        };

        Ok(matched
            .into_iter()
            .skip(skip)
            .take(take)
            .cloned()
            .map(BlogSummary::from)
            .collect())
    }

    async fn get(&self, id: ObjectId) -> RepoResult<Option<BlogPost>> {
        let blogs = self.blogs.read().await;
        Ok(blogs.iter().find(|b| b.id == id).cloned())
    }

    async fn upsert(&self, id: ObjectId, fields: BlogFields) -> RepoResult<UpdateOutcome> {
        if fields.is_empty() {
            return Err(RepoError::EmptyUpdate);
        }

        let mut blogs = self.blogs.write().await;
        match blogs.iter_mut().find(|b| b.id == id) {
            Some(existing) => {
                let before = existing.fields.clone();
                existing.fields.merge(fields);
                Ok(UpdateOutcome {
                    acknowledged: true,
                    matched_count: 1,
                    modified_count: u64::from(existing.fields != before),
                    upserted_count: 0,
                    upserted_id: None,
                })
            }
            None => {
                blogs.push(BlogPost { id, fields });
                Ok(UpdateOutcome {
                    acknowledged: true,
                    matched_count: 0,
                    modified_count: 0,
                    upserted_count: 1,
                    upserted_id: Some(id.to_hex()),
                })
            }
        }
    }

    async fn featured(&self, limit: usize) -> RepoResult<Vec<FeaturedBlog>> {
        let blogs = self.blogs.read().await;
        let mut ranked: Vec<FeaturedBlog> = blogs.iter().map(FeaturedBlog::from_post).collect();
        ranked.sort_by(|a, b| b.word_count.cmp(&a.word_count));
        ranked.truncate(limit);
        assign_serials(&mut ranked);
        Ok(ranked)
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> RepoResult<Vec<BlogPost>> {
        let blogs = self.blogs.read().await;
        let mut found: Vec<BlogPost> = blogs.iter().filter(|b| ids.contains(&b.id)).cloned().collect();
        found.sort_by(|a, b| a.fields.blog_title.cmp(&b.fields.blog_title));
        Ok(found)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn add_comment(&self, comment: NewComment) -> RepoResult<InsertOutcome> {
        let id = ObjectId::new();
        self.comments.write().await.push(Comment { id, body: comment });
        Ok(InsertOutcome::new(id))
    }

    async fn list_comments(&self, blog_id: &str) -> RepoResult<Vec<Comment>> {
        let comments = self.comments.read().await;
        let mut found: Vec<Comment> = comments
            .iter()
            .filter(|c| c.body.blog_id == blog_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.body.commented_on.cmp(&a.body.commented_on));
        Ok(found)
    }

    async fn add_reply(&self, reply: NewReply) -> RepoResult<InsertOutcome> {
        let id = ObjectId::new();
        self.replies.write().await.push(Reply { id, body: reply });
        Ok(InsertOutcome::new(id))
    }

    async fn list_replies(&self, comment_id: &str) -> RepoResult<Vec<Reply>> {
        let replies = self.replies.read().await;
        let mut found: Vec<Reply> = replies
            .iter()
            .filter(|r| r.body.comment_id == comment_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.body.replied_on.cmp(&a.body.replied_on));
        Ok(found)
    }
}

#[async_trait]
impl WishlistRepository for MemoryStore {
    async fn add(&self, entry: NewWishlistEntry) -> RepoResult<InsertOutcome> {
        // Check and insert under one write lock.
        let mut wishlist = self.wishlist.write().await;
        let exists = wishlist
            .iter()
            .any(|w| w.entry.blog_id == entry.blog_id && w.entry.user_email == entry.user_email);
        if exists {
            return Err(RepoError::DuplicateWishlistEntry);
        }

        let id = ObjectId::new();
        wishlist.push(WishlistEntry { id, entry });
        Ok(InsertOutcome::new(id))
    }

    async fn list_by_owner(&self, email: &str) -> RepoResult<Vec<WishlistEntry>> {
        let wishlist = self.wishlist.read().await;
        Ok(wishlist
            .iter()
            .filter(|w| w.entry.user_email == email)
            .cloned()
            .collect())
    }

    async fn remove(&self, email: &str, blog_id: &str) -> RepoResult<DeleteOutcome> {
        let mut wishlist = self.wishlist.write().await;
        let position = wishlist
            .iter()
            .position(|w| w.entry.user_email == email && w.entry.blog_id == blog_id);

        let deleted_count = match position {
            Some(index) => {
                wishlist.remove(index);
                1
            }
            None => 0,
        };

        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count,
        })
    }
}

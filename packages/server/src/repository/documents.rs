//! Stored shapes of the MongoDB collections.
//!
//! Timestamps are BSON dates here and RFC 3339 strings in the HTTP models.

use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

use super::{RepoError, RepoResult};
use crate::models::blog::{BlogFields, BlogPost, FeaturedBlog};
use crate::models::comment::{Comment, NewComment, NewReply, Reply};
use crate::models::wishlist::{NewWishlistEntry, WishlistEntry};

fn to_bson_date(value: Option<DateTime<Utc>>) -> Option<bson::DateTime> {
    value.map(bson::DateTime::from_chrono)
}

fn to_chrono(value: Option<bson::DateTime>) -> Option<DateTime<Utc>> {
    value.map(bson::DateTime::to_chrono)
}

fn require_id(id: Option<ObjectId>) -> RepoResult<ObjectId> {
    id.ok_or_else(|| RepoError::UnexpectedId("document has no _id".into()))
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BlogDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blogger_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blogger_photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_on: Option<bson::DateTime>,
}

impl From<BlogFields> for BlogDocument {
    fn from(f: BlogFields) -> Self {
        Self {
            id: None,
            blog_title: f.blog_title,
            short_description: f.short_description,
            long_description: f.long_description,
            category: f.category,
            image: f.image,
            posted_by: f.posted_by,
            blogger_email: f.blogger_email,
            blogger_photo: f.blogger_photo,
            posted_on: to_bson_date(f.posted_on),
        }
    }
}

impl BlogDocument {
    pub fn into_post(self) -> RepoResult<BlogPost> {
        Ok(BlogPost {
            id: require_id(self.id)?,
            fields: BlogFields {
                blog_title: self.blog_title,
                short_description: self.short_description,
                long_description: self.long_description,
                category: self.category,
                image: self.image,
                posted_by: self.posted_by,
                blogger_email: self.blogger_email,
                blogger_photo: self.blogger_photo,
                posted_on: to_chrono(self.posted_on),
            },
        })
    }
}

/// Output row of the featured aggregation.
#[derive(Debug, Deserialize)]
pub struct FeaturedDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub blog_title: Option<String>,
    #[serde(default)]
    pub posted_on: Option<bson::DateTime>,
    #[serde(default)]
    pub posted_by: Option<String>,
    #[serde(default)]
    pub blogger_photo: Option<String>,
    #[serde(default)]
    pub blogger_email: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub total_characters: i64,
    pub word_count: i64,
}

impl From<FeaturedDocument> for FeaturedBlog {
    fn from(d: FeaturedDocument) -> Self {
        Self {
            id: d.id,
            blog_title: d.blog_title,
            posted_on: to_chrono(d.posted_on),
            posted_by: d.posted_by,
            blogger_photo: d.blogger_photo,
            blogger_email: d.blogger_email,
            image: d.image,
            total_characters: u64::try_from(d.total_characters).unwrap_or(0),
            word_count: u64::try_from(d.word_count).unwrap_or(0),
            serial: 0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub blog_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commenter_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commenter_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commenter_photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commented_on: Option<bson::DateTime>,
}

impl From<NewComment> for CommentDocument {
    fn from(c: NewComment) -> Self {
        Self {
            id: None,
            blog_id: c.blog_id,
            comment: c.comment,
            commenter_name: c.commenter_name,
            commenter_email: c.commenter_email,
            commenter_photo: c.commenter_photo,
            commented_on: to_bson_date(c.commented_on),
        }
    }
}

impl CommentDocument {
    pub fn into_comment(self) -> RepoResult<Comment> {
        Ok(Comment {
            id: require_id(self.id)?,
            body: NewComment {
                blog_id: self.blog_id,
                comment: self.comment,
                commenter_name: self.commenter_name,
                commenter_email: self.commenter_email,
                commenter_photo: self.commenter_photo,
                commented_on: to_chrono(self.commented_on),
            },
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReplyDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub comment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replier_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replier_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replier_photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replied_on: Option<bson::DateTime>,
}

impl From<NewReply> for ReplyDocument {
    fn from(r: NewReply) -> Self {
        Self {
            id: None,
            comment_id: r.comment_id,
            blog_id: r.blog_id,
            reply: r.reply,
            replier_name: r.replier_name,
            replier_email: r.replier_email,
            replier_photo: r.replier_photo,
            replied_on: to_bson_date(r.replied_on),
        }
    }
}

impl ReplyDocument {
    pub fn into_reply(self) -> RepoResult<Reply> {
        Ok(Reply {
            id: require_id(self.id)?,
            body: NewReply {
                comment_id: self.comment_id,
                blog_id: self.blog_id,
                reply: self.reply,
                replier_name: self.replier_name,
                replier_email: self.replier_email,
                replier_photo: self.replier_photo,
                replied_on: to_chrono(self.replied_on),
            },
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WishlistDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub blog_id: String,
    pub user_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_on: Option<bson::DateTime>,
}

impl From<NewWishlistEntry> for WishlistDocument {
    fn from(e: NewWishlistEntry) -> Self {
        Self {
            id: None,
            blog_id: e.blog_id,
            user_email: e.user_email,
            blog_title: e.blog_title,
            category: e.category,
            image: e.image,
            added_on: to_bson_date(e.added_on),
        }
    }
}

impl WishlistDocument {
    pub fn into_entry(self) -> RepoResult<WishlistEntry> {
        Ok(WishlistEntry {
            id: require_id(self.id)?,
            entry: NewWishlistEntry {
                blog_id: self.blog_id,
                user_email: self.user_email,
                blog_title: self.blog_title,
                category: self.category,
                image: self.image,
                added_on: to_chrono(self.added_on),
            },
        })
    }
}

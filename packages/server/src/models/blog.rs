use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::serialize_object_id_as_hex_string;
use serde::{Deserialize, Serialize};

use crate::models::shared::non_blank;

/// Number of posts returned by the featured endpoint.
pub const FEATURED_LIMIT: usize = 10;

/// Writable blog fields, used both to create a post and to upsert one.
///
/// Every field is optional: absent fields are left untouched on upsert and
/// simply not stored on create.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BlogFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Teaching an old dog new tricks")]
    pub blog_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    /// Long-form body. Omitted from summaries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "dogs")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "alice@example.com")]
    pub blogger_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blogger_photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_on: Option<DateTime<Utc>>,
}

impl BlogFields {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite every field that is set in `patch`.
    pub fn merge(&mut self, patch: BlogFields) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if patch.$field.is_some() { self.$field = patch.$field; })*
            };
        }
        take!(
            blog_title,
            short_description,
            long_description,
            category,
            image,
            posted_by,
            blogger_email,
            blogger_photo,
            posted_on
        );
    }
}

/// A stored blog post, including its body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BlogPost {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    #[schema(value_type = String, example = "665f1c2a9b1e8a3d4c2b1a09")]
    pub id: ObjectId,
    #[serde(flatten)]
    pub fields: BlogFields,
}

/// List view of a blog post: every field except the body.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BlogSummary {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    #[schema(value_type = String)]
    pub id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
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
    pub posted_on: Option<DateTime<Utc>>,
}

impl From<BlogPost> for BlogSummary {
    fn from(post: BlogPost) -> Self {
        let f = post.fields;
        Self {
            id: post.id,
            blog_title: f.blog_title,
            short_description: f.short_description,
            category: f.category,
            image: f.image,
            posted_by: f.posted_by,
            blogger_email: f.blogger_email,
            blogger_photo: f.blogger_photo,
            posted_on: f.posted_on,
        }
    }
}

/// A post ranked by body length for the featured list.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FeaturedBlog {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    #[schema(value_type = String)]
    pub id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blogger_photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blogger_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Unicode code points in the body.
    pub total_characters: u64,
    /// Pieces of the body when split on single spaces.
    pub word_count: u64,
    /// 1-based rank in the featured list.
    #[serde(default)]
    pub serial: usize,
}

impl FeaturedBlog {
    pub fn from_post(post: &BlogPost) -> Self {
        let body = post.fields.long_description.as_deref().unwrap_or("");
        Self {
            id: post.id,
            blog_title: post.fields.blog_title.clone(),
            posted_on: post.fields.posted_on,
            posted_by: post.fields.posted_by.clone(),
            blogger_photo: post.fields.blogger_photo.clone(),
            blogger_email: post.fields.blogger_email.clone(),
            image: post.fields.image.clone(),
            total_characters: body.chars().count() as u64,
            word_count: body.split(' ').count() as u64,
            serial: 0,
        }
    }
}

/// Number the featured list 1..k in output order.
pub fn assign_serials(blogs: &mut [FeaturedBlog]) {
    for (index, blog) in blogs.iter_mut().enumerate() {
        blog.serial = index + 1;
    }
}

/// Direction of the `posted_on` sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Negative values sort newest first; anything else, including a missing
    /// or unparseable value, sorts oldest first.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
            Some(n) if n < 0 => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn as_mongo(self) -> i32 {
        match self {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        }
    }
}

/// Filters shared by the count and list operations.
#[derive(Debug, Clone, Default)]
pub struct BlogFilter {
    pub category: Option<String>,
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
    pub author_email: Option<String>,
}

impl BlogFilter {
    pub fn matches(&self, fields: &BlogFields) -> bool {
        if let Some(ref category) = self.category
            && fields.category.as_ref() != Some(category)
        {
            return false;
        }
        if let Some(ref search) = self.search {
            let needle = search.to_lowercase();
            let hit = fields
                .blog_title
                .as_ref()
                .is_some_and(|t| t.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if let Some(ref email) = self.author_email
            && fields.blogger_email.as_ref() != Some(email)
        {
            return false;
        }
        true
    }
}

/// Page request for the list operation.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    /// 0-based page index.
    pub page: u64,
    /// Page size. `None` returns every match.
    pub size: Option<u64>,
    pub sort: SortOrder,
}

/// Query string of `GET /blogs-count`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BlogCountQuery {
    /// Exact category.
    pub category: Option<String>,
    /// Case-insensitive title substring.
    pub search: Option<String>,
}

/// Query string of `GET /blogs`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct BlogListQuery {
    /// 0-based page index.
    pub page: Option<String>,
    /// Page size.
    pub size: Option<String>,
    /// `1` oldest first, `-1` newest first.
    pub sort: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    /// Restrict to posts by this author email.
    pub current_user: Option<String>,
}

fn parse_count(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse().ok())
}

impl BlogCountQuery {
    pub fn into_filter(self) -> BlogFilter {
        BlogFilter {
            category: non_blank(self.category),
            search: non_blank(self.search),
            author_email: None,
        }
    }
}

impl BlogListQuery {
    /// Lenient parse: bad numbers fall back to page 0, no size limit, ascending.
    pub fn into_parts(self) -> (BlogFilter, PageRequest) {
        let page = PageRequest {
            page: parse_count(self.page.as_deref()).unwrap_or(0),
            size: parse_count(self.size.as_deref()).filter(|size| *size > 0),
            sort: SortOrder::from_param(self.sort.as_deref()),
        };
        let filter = BlogFilter {
            category: non_blank(self.category),
            search: non_blank(self.search),
            author_email: non_blank(self.current_user),
        };
        (filter, page)
    }
}

/// `{"count": n}`
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CountResponse {
    pub count: u64,
}

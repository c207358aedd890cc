use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::serialize_object_id_as_hex_string;
use serde::{Deserialize, Serialize};

/// Request body of `POST /comments`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NewComment {
    /// Hex id of the commented blog post.
    #[schema(example = "665f1c2a9b1e8a3d4c2b1a09")]
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
    pub commented_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Comment {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    #[schema(value_type = String)]
    pub id: ObjectId,
    #[serde(flatten)]
    pub body: NewComment,
}

/// Request body of `POST /replies`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NewReply {
    /// Hex id of the comment being answered.
    #[schema(example = "665f1d009b1e8a3d4c2b1a0f")]
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
    pub replied_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Reply {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    #[schema(value_type = String)]
    pub id: ObjectId,
    #[serde(flatten)]
    pub body: NewReply,
}

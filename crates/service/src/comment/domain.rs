use chrono::{DateTime, FixedOffset};
use models::comment::CommentStatus;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Polymorphic reference to the commented entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentTarget {
    /// Kind of entity, e.g. "Article" ("objectName" in requests).
    #[serde(rename = "objectId")]
    pub entity_type: String,
    /// Identifier of the entity within its kind.
    #[serde(rename = "modelId")]
    pub entity_id: String,
}

impl CommentTarget {
    pub fn new(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self { entity_type: entity_type.into(), entity_id: entity_id.into() }
    }
}

/// A stored comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    pub id: i32,
    pub user_id: i32,
    #[serde(flatten)]
    pub target: CommentTarget,
    pub text: String,
    pub parent_id: Option<i32>,
    pub status: CommentStatus,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl From<models::comment::Model> for CommentRecord {
    fn from(m: models::comment::Model) -> Self {
        let status = m.status();
        Self {
            id: m.id,
            user_id: m.user_id,
            target: CommentTarget::new(m.object_id, m.model_id),
            text: m.text,
            parent_id: m.parent_id,
            status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Public part of a user profile shown next to a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorProfile {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub photo: Option<String>,
}

impl From<models::user::Model> for AuthorProfile {
    fn from(u: models::user::Model) -> Self {
        Self { first_name: u.first_name, last_name: u.last_name, middle_name: u.middle_name, photo: u.photo }
    }
}

#[derive(Debug, Clone)]
pub struct CommentWithAuthor {
    pub comment: CommentRecord,
    pub author: Option<AuthorProfile>,
}

/// Comment as returned by the public thread endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadedComment {
    #[serde(flatten)]
    pub comment: CommentRecord,
    pub user: Option<AuthorProfile>,
    pub is_bookmark: bool,
    /// Present on top-level comments only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<ThreadedComment>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentPage {
    pub items: Vec<CommentRecord>,
    pub total: u64,
}

/// Values for a row about to be inserted.
#[derive(Debug, Clone)]
pub struct NewCommentRecord {
    pub user_id: i32,
    pub target: CommentTarget,
    pub text: String,
    pub parent_id: Option<i32>,
    pub status: CommentStatus,
}

/// Whitelisted update; `None` leaves the column alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentChanges {
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub text: Option<String>,
    pub parent_id: Option<i32>,
    pub status: Option<CommentStatus>,
}

impl CommentChanges {
    pub fn is_empty(&self) -> bool { *self == CommentChanges::default() }
}

#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    pub status: Option<CommentStatus>,
}

/// Body of `POST /add-comment`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicCommentInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub object_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub model_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
    /// Number or numeric string; checked by the service.
    #[serde(default)]
    pub parent_id: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ip: Option<String>,
}

/// Body of `POST /comment`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivilegedCommentInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub object_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub model_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default)]
    pub parent_id: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ip: Option<String>,
}

/// Body of `POST /comment/:id`. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub object_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub model_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
    #[serde(default)]
    pub parent_id: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ip: Option<String>,
}

/// Query of `GET /comments`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCommentsQuery {
    pub status: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Strings pass through, numbers and booleans are stringified, anything else is absent.
fn lenient_string<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

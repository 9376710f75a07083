use std::{fmt, str::FromStr};

use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    /// Type of the commented entity ("objectName" on the wire).
    pub object_id: String,
    /// Identifier of the commented entity.
    pub model_id: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub parent_id: Option<i32>,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Parent,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
            Relation::Parent => Entity::belongs_to(Entity)
                .from(Column::ParentId)
                .to(Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Moderation state of a comment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommentStatus {
    New,
    Approve,
    Banned,
}

impl CommentStatus {
    pub const ALL: [CommentStatus; 3] = [CommentStatus::New, CommentStatus::Approve, CommentStatus::Banned];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommentStatus::New => "NEW",
            CommentStatus::Approve => "APPROVE",
            CommentStatus::Banned => "BANNED",
        }
    }
}

impl fmt::Display for CommentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for CommentStatus {
    type Err = errors::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let up = s.trim().to_ascii_uppercase();
        CommentStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == up)
            .ok_or_else(|| errors::ModelError::Validation(format!("unknown comment status: {s}")))
    }
}

/// Column values for a new row.
#[derive(Clone, Debug)]
pub struct NewComment {
    pub user_id: i32,
    pub object_id: String,
    pub model_id: String,
    pub text: String,
    pub parent_id: Option<i32>,
    pub status: CommentStatus,
}

impl Model {
    /// Parsed status; rows written outside this crate may carry junk, which reads as `NEW`.
    pub fn status(&self) -> CommentStatus {
        self.status.parse().unwrap_or(CommentStatus::New)
    }
}

pub fn validate_target(object_id: &str, model_id: &str) -> Result<(), errors::ModelError> {
    if object_id.trim().is_empty() || model_id.trim().is_empty() {
        return Err(errors::ModelError::Validation("comment target required".into()));
    }
    Ok(())
}

pub fn validate_text(text: &str) -> Result<(), errors::ModelError> {
    if text.trim().is_empty() {
        return Err(errors::ModelError::Validation("comment text required".into()));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, new: NewComment) -> Result<Model, errors::ModelError> {
    validate_target(&new.object_id, &new.model_id)?;
    validate_text(&new.text)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        user_id: Set(new.user_id),
        object_id: Set(new.object_id),
        model_id: Set(new.model_id),
        text: Set(new.text),
        parent_id: Set(new.parent_id),
        status: Set(new.status.as_str().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for st in CommentStatus::ALL {
            assert_eq!(st.as_str().parse::<CommentStatus>().unwrap(), st);
        }
        assert_eq!("approve".parse::<CommentStatus>().unwrap(), CommentStatus::Approve);
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!("PENDING".parse::<CommentStatus>().is_err());
    }

    #[test]
    fn status_displays_uppercase() {
        assert_eq!(CommentStatus::Banned.to_string(), "BANNED");
    }

    #[test]
    fn blank_target_or_text_fails_validation() {
        assert!(validate_target("Product", " ").is_err());
        assert!(validate_text("").is_err());
        assert!(validate_target("Product", "7").is_ok());
    }
}

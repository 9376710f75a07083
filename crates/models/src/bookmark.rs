use sea_orm::{entity::prelude::*, PaginatorTrait, QueryFilter, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{comment, errors, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookmark")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub comment_id: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Comment,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
            Relation::Comment => Entity::belongs_to(comment::Entity)
                .from(Column::CommentId)
                .to(comment::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, user_id: i32, comment_id: i32) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        user_id: Set(user_id),
        comment_id: Set(comment_id),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn exists(db: &DatabaseConnection, user_id: i32, comment_id: i32) -> Result<bool, errors::ModelError> {
    let n = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::CommentId.eq(comment_id))
        .count(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(n > 0)
}

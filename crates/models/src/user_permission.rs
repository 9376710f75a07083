use sea_orm::{entity::prelude::*, QueryFilter, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::{errors, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_permission")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub permission: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn grant(db: &DatabaseConnection, user_id: i32, permission: &str) -> Result<Model, errors::ModelError> {
    let permission = permission.trim();
    if permission.is_empty() { return Err(errors::ModelError::Validation("permission required".into())); }
    let am = ActiveModel {
        user_id: Set(user_id),
        permission: Set(permission.to_string()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn names_for_user(db: &DatabaseConnection, user_id: i32) -> Result<Vec<String>, errors::ModelError> {
    let rows = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(rows.into_iter().map(|r| r.permission).collect())
}

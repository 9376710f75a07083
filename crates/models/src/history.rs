use sea_orm::{entity::prelude::*, QueryFilter, QueryOrder, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: Option<i32>,
    pub ip: Option<String>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<i32>,
    pub entity_name: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { match *self {} }
}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for one audit row.
#[derive(Clone, Debug, Default)]
pub struct NewHistory {
    pub user_id: Option<i32>,
    pub ip: Option<String>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<i32>,
    pub entity_name: Option<String>,
}

/// Append one audit row. History is never updated or deleted.
pub async fn append(db: &DatabaseConnection, new: NewHistory) -> Result<Model, errors::ModelError> {
    if new.action.trim().is_empty() { return Err(errors::ModelError::Validation("history action required".into())); }
    if new.entity_type.trim().is_empty() { return Err(errors::ModelError::Validation("history entity type required".into())); }
    let am = ActiveModel {
        user_id: Set(new.user_id),
        ip: Set(new.ip),
        action: Set(new.action),
        entity_type: Set(new.entity_type),
        entity_id: Set(new.entity_id),
        entity_name: Set(new.entity_name),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn for_entity(db: &DatabaseConnection, entity_type: &str, entity_id: i32) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::EntityType.eq(entity_type))
        .filter(Column::EntityId.eq(entity_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

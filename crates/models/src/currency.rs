use sea_orm::{entity::prelude::*, QueryOrder, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "currency")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub code: String,
    pub name: String,
    pub localized_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { match *self {} }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_code(code: &str) -> Result<String, errors::ModelError> {
    let up = code.trim().to_ascii_uppercase();
    if up.len() != 3 || !up.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(errors::ModelError::Validation("currency code must be three letters".into()));
    }
    Ok(up)
}

pub async fn create(db: &DatabaseConnection, code: &str, name: &str, localized_name: &str) -> Result<Model, errors::ModelError> {
    let code = validate_code(code)?;
    let am = ActiveModel {
        code: Set(code),
        name: Set(name.to_string()),
        localized_name: Set(localized_name.to_string()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .order_by_asc(Column::Code)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

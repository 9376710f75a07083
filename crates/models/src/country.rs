use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::{city, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "country")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub code: String,
    pub name: String,
    pub localized_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    City,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::City => Entity::has_many(city::Entity).into() }
    }
}

impl Related<city::Entity> for Entity {
    fn to() -> RelationDef { Relation::City.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, code: &str, name: &str, localized_name: &str) -> Result<Model, errors::ModelError> {
    if code.trim().is_empty() { return Err(errors::ModelError::Validation("country code required".into())); }
    let am = ActiveModel {
        code: Set(code.to_ascii_uppercase()),
        name: Set(name.to_string()),
        localized_name: Set(localized_name.to_string()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

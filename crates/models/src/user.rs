use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, user_permission};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub photo: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Permission,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Permission => Entity::has_many(user_permission::Entity).into() }
    }
}

impl Related<user_permission::Entity> for Entity {
    fn to() -> RelationDef { Relation::Permission.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    if !email.contains('@') { return Err(errors::ModelError::Validation("invalid email".into())); }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("name required".into())); }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, email: &str, first_name: &str, last_name: &str) -> Result<Model, errors::ModelError> {
    validate_email(email)?;
    validate_name(first_name)?;
    validate_name(last_name)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        email: Set(email.to_string()),
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        middle_name: Set(None),
        photo: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

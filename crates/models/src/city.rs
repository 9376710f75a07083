use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::{country, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "city")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub country_id: i32,
    pub name: String,
    pub localized_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Country,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Country => Entity::belongs_to(country::Entity)
                .from(Column::CountryId)
                .to(country::Column::Id)
                .into(),
        }
    }
}

impl Related<country::Entity> for Entity {
    fn to() -> RelationDef { Relation::Country.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// City name paired with its country's code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityLocation {
    pub city: String,
    pub country: String,
}

pub async fn create(db: &DatabaseConnection, country_id: i32, name: &str, localized_name: &str) -> Result<Model, errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("city name required".into())); }
    let am = ActiveModel {
        country_id: Set(country_id),
        name: Set(name.to_string()),
        localized_name: Set(localized_name.to_string()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn location_by_city_id(db: &DatabaseConnection, city_id: i32) -> Result<Option<CityLocation>, errors::ModelError> {
    let found = Entity::find_by_id(city_id)
        .find_also_related(country::Entity)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(found.and_then(|(city, country)| {
        country.map(|c| CityLocation { city: city.name, country: c.code })
    }))
}

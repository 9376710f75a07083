use models::city::CityLocation;
use models::currency;
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::geo::repository::LocationRepository;

pub struct SeaOrmLocationRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl LocationRepository for SeaOrmLocationRepository {
    async fn city_location(&self, city_id: i32) -> Result<Option<CityLocation>, ServiceError> {
        Ok(models::city::location_by_city_id(&self.db, city_id).await?)
    }

    async fn currencies(&self) -> Result<Vec<currency::Model>, ServiceError> {
        Ok(currency::list_all(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn city_location_joins_country_code() {
        let db = models::db::connect_in_memory().await.unwrap();
        let fr = models::country::create(&db, "FR", "France", "France").await.unwrap();
        let lyon = models::city::create(&db, fr.id, "Lyon", "Lyon").await.unwrap();
        let repo = SeaOrmLocationRepository { db };
        let loc = repo.city_location(lyon.id).await.unwrap().unwrap();
        assert_eq!(loc.city, "Lyon");
        assert_eq!(loc.country, "FR");
        assert!(repo.city_location(lyon.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn currencies_come_back_ordered_by_code() {
        let db = models::db::connect_in_memory().await.unwrap();
        models::currency::create(&db, "usd", "US Dollar", "US Dollar").await.unwrap();
        models::currency::create(&db, "EUR", "Euro", "Euro").await.unwrap();
        let repo = SeaOrmLocationRepository { db };
        let codes: Vec<_> = repo.currencies().await.unwrap().into_iter().map(|c| c.code).collect();
        assert_eq!(codes, ["EUR", "USD"]);
    }
}

use async_trait::async_trait;
use models::city::CityLocation;
use models::currency;

use crate::errors::ServiceError;

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn city_location(&self, city_id: i32) -> Result<Option<CityLocation>, ServiceError>;
    async fn currencies(&self) -> Result<Vec<currency::Model>, ServiceError>;
}

/// Fixed in-memory catalogue for tests
pub mod mock {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    pub struct MockLocationRepository {
        pub cities: HashMap<i32, CityLocation>,
        pub currencies: Vec<currency::Model>,
    }

    #[async_trait]
    impl LocationRepository for MockLocationRepository {
        async fn city_location(&self, city_id: i32) -> Result<Option<CityLocation>, ServiceError> {
            Ok(self.cities.get(&city_id).cloned())
        }

        async fn currencies(&self) -> Result<Vec<currency::Model>, ServiceError> {
            Ok(self.currencies.clone())
        }
    }
}

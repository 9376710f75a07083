use std::sync::Arc;

use models::city::CityLocation;
use models::currency;
use tracing::instrument;

use super::repository::LocationRepository;
use crate::errors::ServiceError;

pub struct GeoService {
    repo: Arc<dyn LocationRepository>,
}

impl GeoService {
    pub fn new(repo: Arc<dyn LocationRepository>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn city_location(&self, city_id: i32) -> Result<CityLocation, ServiceError> {
        self.repo.city_location(city_id).await?.ok_or_else(|| ServiceError::not_found("city"))
    }

    /// Every currency ordered by code.
    pub async fn currencies(&self) -> Result<Vec<currency::Model>, ServiceError> {
        let mut all = self.repo.currencies().await?;
        all.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::repository::mock::MockLocationRepository;

    fn currency(id: i32, code: &str) -> currency::Model {
        currency::Model { id, code: code.into(), name: code.into(), localized_name: code.into() }
    }

    #[tokio::test]
    async fn missing_city_is_not_found() {
        let svc = GeoService::new(Arc::new(MockLocationRepository::default()));
        assert_eq!(svc.city_location(1).await.unwrap_err().code(), "RESOURCES_NOT_FOUND");
    }

    #[tokio::test]
    async fn currencies_sorted_by_code() {
        let repo = MockLocationRepository { currencies: vec![currency(1, "USD"), currency(2, "EUR")], ..Default::default() };
        let svc = GeoService::new(Arc::new(repo));
        let codes: Vec<_> = svc.currencies().await.unwrap().into_iter().map(|c| c.code).collect();
        assert_eq!(codes, ["EUR", "USD"]);
    }
}

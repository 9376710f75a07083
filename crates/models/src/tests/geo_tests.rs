use anyhow::Result;

use crate::city::{self, CityLocation};
use crate::db::connect_in_memory;
use crate::{country, currency};

#[tokio::test]
async fn city_location_joins_country_code() -> Result<()> {
    let db = connect_in_memory().await?;
    let de = country::create(&db, "de", "Germany", "Deutschland").await?;
    let berlin = city::create(&db, de.id, "Berlin", "Berlin").await?;

    let loc = city::location_by_city_id(&db, berlin.id).await?;
    assert_eq!(loc, Some(CityLocation { city: "Berlin".into(), country: "DE".into() }));
    Ok(())
}

#[tokio::test]
async fn unknown_city_has_no_location() -> Result<()> {
    let db = connect_in_memory().await?;
    assert_eq!(city::location_by_city_id(&db, 999).await?, None);
    Ok(())
}

#[tokio::test]
async fn currencies_are_listed_by_code() -> Result<()> {
    let db = connect_in_memory().await?;
    currency::create(&db, "usd", "US Dollar", "US Dollar").await?;
    currency::create(&db, "EUR", "Euro", "Euro").await?;

    let codes: Vec<_> = currency::list_all(&db).await?.into_iter().map(|c| c.code).collect();
    assert_eq!(codes, ["EUR", "USD"]);
    Ok(())
}

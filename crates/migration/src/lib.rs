//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_country;
mod m20240301_000002_create_city;
mod m20240301_000003_create_currency;
mod m20240301_000004_create_user;
mod m20240301_000005_create_user_permission;
mod m20240301_000006_create_comment;
mod m20240301_000007_create_bookmark;
mod m20240301_000008_create_history;
mod m20240301_000009_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_country::Migration),
            Box::new(m20240301_000002_create_city::Migration),
            Box::new(m20240301_000003_create_currency::Migration),
            Box::new(m20240301_000004_create_user::Migration),
            Box::new(m20240301_000005_create_user_permission::Migration),
            Box::new(m20240301_000006_create_comment::Migration),
            Box::new(m20240301_000007_create_bookmark::Migration),
            Box::new(m20240301_000008_create_history::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000009_add_indexes::Migration),
        ]
    }
}

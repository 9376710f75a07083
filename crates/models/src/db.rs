use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

/// Connect with the pool settings from `[database]`.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    if cfg.is_sqlite() && cfg.url.contains(":memory:") {
        // every sqlite memory connection is a separate database
        opt.max_connections(1).min_connections(1);
    }
    let db = Database::connect(opt).await?;
    info!(max_connections = cfg.max_connections, sqlite = cfg.is_sqlite(), "database connected");
    Ok(db)
}

/// Fresh in-memory SQLite database with the full schema applied.
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    use migration::MigratorTrait;

    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), min_connections: 1, max_connections: 1, ..Default::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

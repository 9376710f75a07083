use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerAuthConfig, ServerState};
use service::{
    access::repo::seaorm::SeaOrmCallerRepository,
    comment::{repo::seaorm::SeaOrmCommentRepository, CommentService},
    geo::{repo::seaorm::SeaOrmLocationRepository, GeoService},
    history::repo::seaorm::SeaOrmHistoryRecorder,
    runtime,
    upload::UploadService,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `config.toml` (path from `CONFIG_PATH`), falling back to environment variables.
pub fn load_config() -> Result<AppConfig, StartupError> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            warn!(error = %e, "config file unusable, reading environment");
            AppConfig::from_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
        }
    }
}

/// Wire SeaORM repositories and storage into the shared handler state.
pub fn state_from_parts(db: DatabaseConnection, jwt_secret: String, uploads: UploadService) -> ServerState {
    let comments = CommentService::new(
        Arc::new(SeaOrmCommentRepository { db: db.clone() }),
        Arc::new(SeaOrmHistoryRecorder { db: db.clone() }),
    );
    ServerState {
        auth: ServerAuthConfig { jwt_secret },
        callers: Arc::new(SeaOrmCallerRepository { db: db.clone() }),
        comments: Arc::new(comments),
        geo: Arc::new(GeoService::new(Arc::new(SeaOrmLocationRepository { db }))),
        uploads: Arc::new(uploads),
    }
}

/// Build the router for `cfg`: connect, migrate, wire state.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await.map_err(|e| StartupError::Runtime(format!("migration failed: {e}")))?;
    let uploads = UploadService::from_config(&cfg.storage).map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let state = state_from_parts(db, cfg.auth.jwt_secret.clone(), uploads);
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and serve until `shutdown` resolves.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    runtime::ensure_env(&cfg.server.data_dir).await?;
    let app = build_app(&cfg).await?;

    let addr: SocketAddr = cfg
        .server
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))?;
    info!(%addr, sqlite = cfg.database.is_sqlite(), s3 = cfg.storage.uses_s3(), "starting comment api");
    let listener = TcpListener::bind(addr).await.map_err(|e| StartupError::Runtime(e.to_string()))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;
    info!("server stopped");
    Ok(())
}

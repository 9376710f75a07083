use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;

pub mod auth;
pub mod comments;
pub mod geo;
pub mod uploads;

pub use auth::{ServerAuthConfig, ServerState};

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public health and docs, everything else behind bearer auth.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let upload_limit = state.uploads.max_upload_bytes();
    let public = Router::new()
        .route("/health", get(health))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let protected = Router::new()
        .route("/get-comments/:modelId/:objectName", get(comments::thread))
        .route("/add-comment", post(comments::add))
        .route("/comments", get(comments::list))
        .route("/comment", post(comments::create))
        .route("/comment/:id", get(comments::get).post(comments::update).delete(comments::delete))
        .route(
            "/upload/:bucket",
            post(uploads::upload).delete(uploads::remove).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/cities/:id/location", get(geo::city_location))
        .route("/currencies", get(geo::currencies))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_auth));

    public
        .merge(protected)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

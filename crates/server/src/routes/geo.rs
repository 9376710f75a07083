use axum::extract::State;
use axum::Json;
use common::types::SUCCESS;
use serde_json::{json, Value};

use crate::errors::JsonApiError;
use crate::extract::IdPath;
use crate::routes::auth::ServerState;

#[utoipa::path(
    get, path = "/cities/{id}/location", tag = "geo",
    params(("id" = i32, Path, description = "City id")),
    responses((status = 200, description = "City name with country code"), (status = 404, description = "Not found"))
)]
pub async fn city_location(State(state): State<ServerState>, IdPath(id): IdPath) -> Result<Json<Value>, JsonApiError> {
    let loc = state.geo.city_location(id).await?;
    Ok(Json(json!({ "status": SUCCESS, "item": loc })))
}

#[utoipa::path(
    get, path = "/currencies", tag = "geo",
    responses((status = 200, description = "Currencies ordered by code"))
)]
pub async fn currencies(State(state): State<ServerState>) -> Result<Json<Value>, JsonApiError> {
    let all = state.geo.currencies().await?;
    Ok(Json(json!({ "status": SUCCESS, "items": all })))
}

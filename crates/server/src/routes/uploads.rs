use axum::extract::{Multipart, Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use service::access::Caller;
use tracing::info;

use common::types::SUCCESS;

use crate::errors::JsonApiError;
use crate::extract::JsonBody;
use crate::routes::auth::ServerState;

#[utoipa::path(
    post, path = "/upload/{bucket}", tag = "uploads",
    params(("bucket" = String, Path, description = "Configured bucket name")),
    responses(
        (status = 200, description = "Stored; one url per file field"),
        (status = 404, description = "Unknown bucket"),
        (status = 415, description = "Media type not allowed")
    )
)]
pub async fn upload(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    Path(bucket): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<Value>, JsonApiError> {
    let mut stored = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| JsonApiError::bad_request("BODY_IS_INVALID", e.body_text()))?
    {
        let name = field.name().unwrap_or("file").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| JsonApiError::bad_request("BODY_IS_INVALID", e.body_text()))?;
        stored.push(state.uploads.store(&bucket, &name, &content_type, data.to_vec()).await?);
    }
    if stored.is_empty() {
        return Err(JsonApiError::bad_request("FILE_IS_REQUIRED", "file is required"));
    }
    info!(user_id = caller.id, bucket = %bucket, count = stored.len(), "files uploaded");
    Ok(Json(json!({ "status": SUCCESS, "items": stored })))
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RemoveInput {
    pub url: Option<String>,
}

#[utoipa::path(
    delete, path = "/upload/{bucket}", tag = "uploads",
    params(("bucket" = String, Path, description = "Configured bucket name")),
    request_body = RemoveInput,
    responses(
        (status = 200, description = "Removed"),
        (status = 400, description = "Missing or invalid url"),
        (status = 404, description = "Unknown bucket")
    )
)]
pub async fn remove(
    State(state): State<ServerState>,
    Path(bucket): Path<String>,
    JsonBody(input): JsonBody<RemoveInput>,
) -> Result<Json<Value>, JsonApiError> {
    let url = input
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| JsonApiError::bad_request("URL_IS_REQUIRED", "url is required"))?;
    state.uploads.remove(&bucket, &url).await?;
    Ok(Json(json!({ "status": SUCCESS })))
}

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::Value;
use service::access::Caller;
use service::comment::domain::{
    CommentTarget, ListCommentsQuery, PrivilegedCommentInput, PublicCommentInput, UpdateCommentInput,
};
use tracing::info;

use crate::errors::JsonApiError;
use crate::extract::{client_ip, IdPath, JsonBody, QueryParams};
use crate::format;
use crate::routes::auth::ServerState;

#[utoipa::path(
    get, path = "/get-comments/{modelId}/{objectName}", tag = "comments",
    params(("modelId" = String, Path, description = "Entity id"), ("objectName" = String, Path, description = "Entity type")),
    responses(
        (status = 200, description = "Approved comments with one level of answers"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn thread(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    Path((model_id, object_name)): Path<(String, String)>,
) -> Result<Json<Value>, JsonApiError> {
    let target = CommentTarget::new(object_name, model_id);
    let comments = state.comments.thread(&target, Some(&caller)).await?;
    format::items(&comments)
}

#[utoipa::path(
    post, path = "/add-comment", tag = "comments",
    request_body = crate::openapi::PublicCommentDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Missing or invalid field"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn add(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    headers: HeaderMap,
    JsonBody(input): JsonBody<PublicCommentInput>,
) -> Result<Json<Value>, JsonApiError> {
    let created = state.comments.create_public(&caller, input, client_ip(&headers)).await?;
    format::item(&created)
}

#[utoipa::path(
    get, path = "/comments", tag = "comments",
    params(
        ("status" = Option<String>, Query, description = "NEW, APPROVE or BANNED"),
        ("limit" = Option<u64>, Query, description = "Page size, default 12"),
        ("offset" = Option<u64>, Query, description = "Rows to skip")
    ),
    responses(
        (status = 200, description = "Page of comments with total"),
        (status = 403, description = "Permission denied")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    QueryParams(query): QueryParams<ListCommentsQuery>,
) -> Result<Json<Value>, JsonApiError> {
    let page = state.comments.list(&caller, query).await?;
    info!(count = page.items.len(), total = page.total, "list comments");
    format::page(&page.items, page.total)
}

#[utoipa::path(
    get, path = "/comment/{id}", tag = "comments",
    params(("id" = i32, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Found"),
        (status = 403, description = "Permission denied"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    IdPath(id): IdPath,
) -> Result<Json<Value>, JsonApiError> {
    let found = state.comments.get(&caller, id).await?;
    format::item(&found)
}

#[utoipa::path(
    post, path = "/comment/{id}", tag = "comments",
    params(("id" = i32, Path, description = "Comment id")),
    request_body = crate::openapi::UpdateCommentDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Invalid field"),
        (status = 403, description = "Permission denied"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    IdPath(id): IdPath,
    headers: HeaderMap,
    JsonBody(input): JsonBody<UpdateCommentInput>,
) -> Result<Json<Value>, JsonApiError> {
    let saved = state.comments.update(&caller, id, input, client_ip(&headers)).await?;
    format::item(&saved)
}

#[utoipa::path(
    post, path = "/comment", tag = "comments",
    request_body = crate::openapi::PrivilegedCommentDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Missing or invalid field"),
        (status = 403, description = "Permission denied")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    headers: HeaderMap,
    JsonBody(input): JsonBody<PrivilegedCommentInput>,
) -> Result<Json<Value>, JsonApiError> {
    let created = state.comments.create_privileged(&caller, input, client_ip(&headers)).await?;
    format::item(&created)
}

#[derive(Debug, Default, Deserialize)]
struct DeleteBody {
    ip: Option<String>,
}

#[utoipa::path(
    delete, path = "/comment/{id}", tag = "comments",
    params(("id" = i32, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 403, description = "Permission denied"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    IdPath(id): IdPath,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, JsonApiError> {
    // the body is optional here
    let ip = serde_json::from_slice::<DeleteBody>(&body).ok().and_then(|b| b.ip).or_else(|| client_ip(&headers));
    state.comments.delete(&caller, id, ip).await?;
    Ok(format::ok())
}

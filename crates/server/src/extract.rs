//! Request extractors that reject with `JsonApiError` instead of plain text.

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::errors::JsonApiError;

/// JSON body; a malformed body yields 400 `BODY_IS_INVALID`.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(v)) => Ok(JsonBody(v)),
            Err(rej) => Err(JsonApiError::bad_request("BODY_IS_INVALID", rej.body_text())),
        }
    }
}

/// Numeric `:id` path segment; anything else yields 400 `ID_IS_INVALID`.
pub struct IdPath(pub i32);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for IdPath {
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| JsonApiError::bad_request("ID_IS_INVALID", "id is invalid"))?;
        match raw.trim().parse::<i32>() {
            Ok(id) if id > 0 => Ok(IdPath(id)),
            _ => Err(JsonApiError::bad_request("ID_IS_INVALID", "id is invalid")),
        }
    }
}

/// Query string; a malformed one yields 400 `QUERY_IS_INVALID`.
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(v)| QueryParams(v))
            .map_err(|rej| JsonApiError::bad_request("QUERY_IS_INVALID", rej.body_text()))
    }
}

/// Client address from proxy headers: first `X-Forwarded-For` hop, else `X-Real-IP`.
pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    let real = || headers.get("x-real-ip").and_then(|v| v.to_str().ok()).map(str::trim).filter(|v| !v.is_empty());
    forwarded.or_else(real).map(str::to_string)
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::access::errors::AccessError;
use service::errors::ServiceError;
use service::upload::UploadError;
use thiserror::Error;
use tracing::error;

/// Error response rendered as `{code, message}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { status, code: code.into(), message: message.into() }
    }

    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn unauthorized() -> Self { Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "authentication required") }

    /// Log the detail, return a generic body.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        error!(error = %detail, "internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", "internal error")
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { code: self.code, message: self.message })).into_response()
    }
}

impl From<AccessError> for JsonApiError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::Unauthenticated => JsonApiError::unauthorized(),
            AccessError::Forbidden(_) => JsonApiError::new(StatusCode::FORBIDDEN, e.code(), e.to_string()),
            other => JsonApiError::internal(other),
        }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Access(a) => a.into(),
            other if other.is_internal() => JsonApiError::internal(other),
            other => {
                let status = match other {
                    ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                    _ => StatusCode::BAD_REQUEST,
                };
                JsonApiError::new(status, other.code(), other.to_string())
            }
        }
    }
}

impl From<UploadError> for JsonApiError {
    fn from(e: UploadError) -> Self {
        let status = match e {
            UploadError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            UploadError::BucketNotFound(_) => StatusCode::NOT_FOUND,
            UploadError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            UploadError::Init(_) | UploadError::Storage(_) => return JsonApiError::internal(e),
        };
        JsonApiError::new(status, e.code(), e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

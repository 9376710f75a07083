use thiserror::Error;

use crate::access::errors::AccessError;

/// Business errors surfaced by the services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("{field} is invalid")]
    Invalid { field: &'static str },
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
    #[error(transparent)]
    Access(#[from] AccessError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn required(field: &'static str) -> Self { Self::Required { field } }

    pub fn invalid(field: &'static str) -> Self { Self::Invalid { field } }

    /// Stable machine-readable code for the response body.
    pub fn code(&self) -> String {
        match self {
            ServiceError::Required { field } => format!("{}_IS_REQUIRED", field.to_uppercase()),
            ServiceError::Invalid { field } => format!("{}_IS_INVALID", field.to_uppercase()),
            ServiceError::NotFound(_) => "RESOURCES_NOT_FOUND".into(),
            ServiceError::Model(models::errors::ModelError::Validation(_)) => "VALIDATION_ERROR".into(),
            ServiceError::Db(_) | ServiceError::Model(_) => "INTERNAL_ERROR".into(),
            ServiceError::Access(e) => e.code().into(),
        }
    }

    /// Storage and other failures the client cannot act on.
    pub fn is_internal(&self) -> bool {
        match self {
            ServiceError::Db(_) | ServiceError::Model(models::errors::ModelError::Db(_)) => true,
            ServiceError::Access(e) => e.is_internal(),
            _ => false,
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { ServiceError::Db(e.to_string()) }
}

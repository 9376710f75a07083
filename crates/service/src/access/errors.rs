use thiserror::Error;

use super::domain::Permission;

/// Authentication and authorization failures.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("permission denied: {0}")]
    Forbidden(Permission),
    #[error("unknown permission: {0}")]
    UnknownPermission(String),
    #[error("token error: {0}")]
    Token(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AccessError {
    pub fn code(&self) -> &'static str {
        match self {
            AccessError::Unauthenticated => "UNAUTHORIZED",
            AccessError::Forbidden(_) => "PERMISSION_DENIED",
            AccessError::UnknownPermission(_) | AccessError::Token(_) | AccessError::Repository(_) => "INTERNAL_ERROR",
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, AccessError::UnknownPermission(_) | AccessError::Token(_) | AccessError::Repository(_))
    }
}

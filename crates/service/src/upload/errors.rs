use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),
    #[error("bucket not found: {0}")]
    BucketNotFound(String),
    #[error("url is invalid: {0}")]
    InvalidUrl(String),
    #[error("storage initialization failed: {0}")]
    Init(String),
    #[error("storage error: {0}")]
    Storage(#[from] opendal::Error),
}

impl UploadError {
    pub fn code(&self) -> &'static str {
        match self {
            UploadError::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            UploadError::BucketNotFound(_) => "BUCKET_NOT_FOUND",
            UploadError::InvalidUrl(_) => "URL_IS_INVALID",
            UploadError::Init(_) | UploadError::Storage(_) => "INTERNAL_ERROR",
        }
    }
}

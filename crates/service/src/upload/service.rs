use std::collections::HashMap;

use chrono::Utc;
use configs::StorageConfig;
use opendal::{services, ErrorKind, Operator};
use serde::Serialize;
use tracing::{info, instrument};

use super::errors::UploadError;
use super::media;

/// Result of one stored multipart field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredObject {
    pub field: String,
    pub url: String,
}

struct Bucket {
    physical: String,
    operator: Operator,
}

/// Largest accepted upload request when none is configured.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Named buckets backed by S3, or by memory when no credentials are configured.
pub struct UploadService {
    buckets: HashMap<String, Bucket>,
    public_base_url: String,
    max_upload_bytes: usize,
}

impl UploadService {
    pub fn from_config(cfg: &StorageConfig) -> Result<Self, UploadError> {
        if !cfg.uses_s3() {
            let names: Vec<&str> = cfg.buckets.keys().map(String::as_str).collect();
            return Ok(Self::in_memory(&names, &cfg.public_base_url)?.with_max_upload_bytes(cfg.max_upload_bytes));
        }
        let mut buckets = HashMap::new();
        for (name, physical) in &cfg.buckets {
            let mut builder = services::S3::default()
                .bucket(physical)
                .region(&cfg.region)
                .access_key_id(&cfg.access_key_id)
                .secret_access_key(&cfg.secret_access_key);
            if let Some(ep) = cfg.endpoint.as_deref().filter(|e| !e.trim().is_empty()) {
                builder = builder.endpoint(ep);
            }
            let operator = Operator::new(builder).map_err(|e| UploadError::Init(e.to_string()))?.finish();
            buckets.insert(name.clone(), Bucket { physical: physical.clone(), operator });
        }
        info!(buckets = buckets.len(), backend = "s3", "upload storage ready");
        Ok(Self { buckets, public_base_url: cfg.public_base_url.clone(), max_upload_bytes: cfg.max_upload_bytes })
    }

    /// Memory-backed buckets, physical name equal to the logical one.
    pub fn in_memory(names: &[&str], public_base_url: &str) -> Result<Self, UploadError> {
        let mut buckets = HashMap::new();
        for name in names {
            let operator = Operator::new(services::Memory::default())
                .map_err(|e| UploadError::Init(e.to_string()))?
                .finish();
            buckets.insert(name.to_string(), Bucket { physical: name.to_string(), operator });
        }
        info!(buckets = buckets.len(), backend = "memory", "upload storage ready");
        Ok(Self { buckets, public_base_url: public_base_url.to_string(), max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES })
    }

    pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.max_upload_bytes = limit;
        self
    }

    /// Request body cap for the upload endpoint.
    pub fn max_upload_bytes(&self) -> usize { self.max_upload_bytes }

    fn bucket(&self, name: &str) -> Result<&Bucket, UploadError> {
        self.buckets.get(name).ok_or_else(|| UploadError::BucketNotFound(name.to_string()))
    }

    pub fn object_key(field: &str, millis: i64) -> String { format!("{field}_{millis}") }

    /// Last path segment of a previously returned URL.
    pub fn key_from_url(url: &str) -> Option<&str> {
        let path = url.split(|c| c == '?' || c == '#').next().unwrap_or_default();
        path.rsplit('/').next().map(str::trim).filter(|k| !k.is_empty())
    }

    fn url_for(&self, bucket: &Bucket, key: &str) -> String {
        format!("{}/{}/{}", self.public_base_url.trim_end_matches('/'), bucket.physical, key)
    }

    /// Check the media type then write the object.
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub async fn store(
        &self,
        bucket: &str,
        field: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<StoredObject, UploadError> {
        let b = self.bucket(bucket)?;
        if !media::is_allowed(content_type) {
            return Err(UploadError::UnsupportedMediaType(content_type.to_string()));
        }
        let key = Self::object_key(field, Utc::now().timestamp_millis());
        b.operator.write(&key, data).await?;
        let url = self.url_for(b, &key);
        info!(bucket, key = %key, "object stored");
        Ok(StoredObject { field: field.to_string(), url })
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, bucket: &str, url: &str) -> Result<(), UploadError> {
        let b = self.bucket(bucket)?;
        let key = Self::key_from_url(url).ok_or_else(|| UploadError::InvalidUrl(url.to_string()))?;
        b.operator.delete(key).await?;
        info!(bucket, key, "object removed");
        Ok(())
    }

    pub async fn exists(&self, bucket: &str, key: &str) -> Result<bool, UploadError> {
        match self.bucket(bucket)?.operator.stat(key).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

//! Object-storage uploads keyed by field name and time.

pub mod errors;
pub mod media;
pub mod service;

pub use errors::UploadError;
pub use service::{StoredObject, UploadService};

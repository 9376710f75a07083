//! Comment module: domain, repository, service.
//!
//! Threads are single level: top-level comments carry their direct replies
//! in `answers`, replies carry nothing further.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;
pub mod validation;

pub use service::CommentService;

//! Service layer providing the comment workflow on top of models.
//! - Separates business logic from data access (repository traits).
//! - Every repository has a SeaORM implementation and an in-memory one in
//!   its `mock` module, used by unit tests here and by callers' own tests.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod access;
pub mod comment;
pub mod history;
pub mod geo;
pub mod upload;
pub mod runtime;
#[cfg(test)]
pub mod test_support;

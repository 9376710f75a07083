//! Access module: who is calling and what they may do.
//!
//! Authentication (bearer token -> `Caller`) and authorization (the stateless
//! `policy::authorize` check) live here so the HTTP layer only wires them up.

pub mod domain;
pub mod errors;
pub mod policy;
pub mod repository;
pub mod repo;
pub mod token;

pub use domain::{Caller, Permission};
pub use policy::authorize;

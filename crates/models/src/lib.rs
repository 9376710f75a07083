//! SeaORM entities for the comment backend plus small entity-level helpers
//! (validation and the inserts the services and tests rely on).

pub mod errors;
pub mod db;
pub mod country;
pub mod city;
pub mod currency;
pub mod user;
pub mod user_permission;
pub mod comment;
pub mod bookmark;
pub mod history;

#[cfg(test)]
mod tests;

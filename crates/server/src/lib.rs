pub mod routes;
pub mod startup;
pub mod errors;
pub mod extract;
pub mod format;
pub mod openapi;

pub use startup::run;

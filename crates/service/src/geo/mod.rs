//! City/country resolution and the currency catalogue.

pub mod repository;
pub mod repo;
pub mod service;

pub use service::GeoService;

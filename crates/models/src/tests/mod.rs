/// Comment, user, bookmark and history rows against an in-memory SQLite schema
pub mod crud_tests;

/// Country, city and currency lookups
pub mod geo_tests;

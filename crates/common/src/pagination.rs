//! Offset pagination shared by list endpoints.
//!
//! Query strings carry `limit` and `offset`; both are optional.

use serde::Deserialize;

/// Default page size when the caller omits `limit`.
pub const DEFAULT_LIMIT: u64 = 12;
/// Upper bound on `limit` to keep list queries bounded.
pub const MAX_LIMIT: u64 = 100;

/// Raw pagination input
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct Pagination {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Pagination {
    pub fn new(limit: u64, offset: u64) -> Self {
        Self { limit: Some(limit), offset: Some(offset) }
    }

    /// Apply defaults and clamp; returns `(limit, offset)`.
    pub fn normalize(self) -> (u64, u64) {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        (limit, self.offset.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_twelve_from_zero() {
        assert_eq!(Pagination::default().normalize(), (12, 0));
    }

    #[test]
    fn clamps_limit_bounds() {
        assert_eq!(Pagination::new(0, 3).normalize(), (1, 3));
        assert_eq!(Pagination::new(1000, 0).normalize(), (MAX_LIMIT, 0));
    }

    #[test]
    fn keeps_explicit_values() {
        assert_eq!(Pagination::new(2, 4).normalize(), (2, 4));
    }
}

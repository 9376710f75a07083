//! Shared building blocks used by every crate in the workspace:
//! response DTOs, offset pagination, logging setup and runtime checks.

pub mod types;
pub mod utils;
pub mod pagination;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn success_status_literal() {
        assert_eq!(types::SUCCESS, "SUCCESS");
    }
}

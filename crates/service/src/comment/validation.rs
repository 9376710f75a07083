//! Field checks shared by the create and update flows.

use models::comment::CommentStatus;
use serde_json::Value;

use crate::errors::ServiceError;

/// Trimmed, non-empty value.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Fail with the first field in `fields` that is missing, null or blank.
///
/// Every field is inspected before any write happens, so the caller gets the
/// same error regardless of storage state.
pub fn require_all(fields: &[(&'static str, bool)]) -> Result<(), ServiceError> {
    match fields.iter().find(|(_, present)| !present) {
        Some((name, _)) => Err(ServiceError::required(name)),
        None => Ok(()),
    }
}

pub fn value_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

/// Positive id from a JSON number or numeric string; blank means absent.
pub fn parse_id(field: &'static str, value: Option<&Value>) -> Result<Option<i32>, ServiceError> {
    let id = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().parse::<i32>().ok(),
        Some(Value::Number(n)) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Some(_) => None,
    };
    match id {
        Some(id) if id > 0 => Ok(Some(id)),
        _ => Err(ServiceError::invalid(field)),
    }
}

pub fn parse_status(value: &str) -> Result<CommentStatus, ServiceError> {
    value.parse::<CommentStatus>().map_err(|_| ServiceError::invalid("status"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_missing_field_wins() {
        let err = require_all(&[("objectName", true), ("modelId", false), ("text", false)]).unwrap_err();
        assert_eq!(err.code(), "MODELID_IS_REQUIRED");
        assert!(require_all(&[("a", true)]).is_ok());
    }

    #[test]
    fn blank_strings_are_absent() {
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(Some(" x ")), Some("x"));
        assert!(!value_present(Some(&json!(" "))));
        assert!(!value_present(Some(&Value::Null)));
        assert!(value_present(Some(&json!(0))));
    }

    #[test]
    fn ids_parse_from_numbers_and_strings() {
        assert_eq!(parse_id("parentId", Some(&json!(4))).unwrap(), Some(4));
        assert_eq!(parse_id("parentId", Some(&json!(" 9 "))).unwrap(), Some(9));
        assert_eq!(parse_id("parentId", Some(&json!(""))).unwrap(), None);
        assert_eq!(parse_id("parentId", None).unwrap(), None);
    }

    #[test]
    fn bad_ids_are_invalid() {
        for v in [json!("abc"), json!(-1), json!(0), json!(1.5), json!([1]), json!(u64::MAX)] {
            let err = parse_id("parentId", Some(&v)).unwrap_err();
            assert_eq!(err.code(), "PARENTID_IS_INVALID", "value {v}");
        }
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(parse_status("approve").unwrap(), CommentStatus::Approve);
        assert_eq!(parse_status("GONE").unwrap_err().code(), "STATUS_IS_INVALID");
    }
}

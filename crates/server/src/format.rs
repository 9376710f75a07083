//! Response envelopes and the record key style.
//!
//! Records go out with the first letter of every key upper-cased
//! (`UserId`, `IsBookmark`, `User.FirstName`); envelope keys stay lower-case.

use axum::Json;
use common::types::SUCCESS;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::errors::JsonApiError;

fn capitalize_first(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Upper-case the first letter of every object key, recursively.
pub fn capitalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let out: Map<String, Value> =
                map.into_iter().map(|(k, v)| (capitalize_first(&k), capitalize_keys(v))).collect();
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(capitalize_keys).collect()),
        other => other,
    }
}

/// Serialize a record (or list of records) in the outgoing key style.
pub fn record<T: Serialize>(value: &T) -> Result<Value, JsonApiError> {
    serde_json::to_value(value).map(capitalize_keys).map_err(JsonApiError::internal)
}

pub fn item<T: Serialize>(value: &T) -> Result<Json<Value>, JsonApiError> {
    Ok(Json(json!({ "status": SUCCESS, "item": record(value)? })))
}

pub fn items<T: Serialize>(values: &[T]) -> Result<Json<Value>, JsonApiError> {
    Ok(Json(json!({ "status": SUCCESS, "items": record(&values)? })))
}

pub fn page<T: Serialize>(values: &[T], total: u64) -> Result<Json<Value>, JsonApiError> {
    Ok(Json(json!({ "status": SUCCESS, "items": record(&values)?, "total": total })))
}

pub fn ok() -> Json<Value> { Json(json!({ "status": SUCCESS })) }

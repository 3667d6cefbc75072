//! Shape checks for raw AnkiConnect results.
//!
//! AnkiConnect answers `null` where a collection is empty, so each helper
//! maps `null` to the empty shape before checking the type.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub(crate) fn list(result: Value, action: &'static str) -> Result<Vec<Value>> {
    match result {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items),
        other => Err(Error::unexpected(
            action,
            format!("expected an array, got {}", kind_of(&other)),
        )),
    }
}

pub(crate) fn object(result: Value, action: &'static str) -> Result<Map<String, Value>> {
    match result {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map),
        other => Err(Error::unexpected(
            action,
            format!("expected an object, got {}", kind_of(&other)),
        )),
    }
}

/// Replace `null` with `empty`, passing anything else through.
pub(crate) fn or_empty(result: Value, empty: Value) -> Value {
    if result.is_null() { empty } else { result }
}

/// Collapse an info lookup to a single record when one ID was requested.
///
/// With several IDs the list is returned as-is, without checking that
/// every ID matched.
pub(crate) fn collapse(mut records: Vec<Value>, ids: &[i64], kind: &str) -> Result<Value> {
    match ids {
        [id] => {
            if records.is_empty() {
                Err(Error::NotFound(format!("{} {} not found", kind, id)))
            } else {
                Ok(records.swap_remove(0))
            }
        }
        _ => Ok(Value::Array(records)),
    }
}

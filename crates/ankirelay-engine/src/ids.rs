//! Identifier coercion.
//!
//! Callers send note and card IDs as integers, floats or decimal strings.
//! [`RawId`] captures whichever form arrived and [`RawId::canonical`]
//! collapses it to an `i64`. Batch coercion is lenient: entries that do not
//! parse are dropped. IDs that AnkiConnect itself returns go through the
//! strict [`narrow_ids`] instead, where a non-numeric entry is an error.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::response::kind_of;

/// An identifier as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RawId {
    /// An integer, e.g. `1502298033753`.
    Integer(i64),
    /// A floating-point number, e.g. `1502298033753.0`.
    Float(f64),
    /// A decimal string, e.g. `"1502298033753"`.
    Text(String),
    /// Anything else. Never parses.
    Other(Value),
}

impl RawId {
    /// The canonical integer form, if this identifier has one.
    ///
    /// Floats truncate toward zero; non-finite or out-of-range floats do not
    /// parse. Strings must be a plain decimal integer.
    pub fn canonical(&self) -> Option<i64> {
        match self {
            RawId::Integer(n) => Some(*n),
            RawId::Float(f) => float_to_id(*f),
            RawId::Text(s) => s.parse().ok(),
            RawId::Other(_) => None,
        }
    }
}

impl From<i64> for RawId {
    fn from(n: i64) -> Self {
        RawId::Integer(n)
    }
}

impl From<&str> for RawId {
    fn from(s: &str) -> Self {
        RawId::Text(s.to_string())
    }
}

fn float_to_id(f: f64) -> Option<i64> {
    // 2^63 is exactly representable; anything at or above it overflows.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.is_finite() && f >= -LIMIT && f < LIMIT {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

/// Coerce a batch of caller-supplied IDs, dropping any that do not parse.
///
/// Order is preserved.
pub fn coerce_ids(ids: &[RawId]) -> Vec<i64> {
    ids.iter().filter_map(RawId::canonical).collect()
}

/// Split a comma-separated path segment into trimmed, non-empty tokens.
///
/// No numeric interpretation happens here.
///
/// ```
/// use ankirelay_engine::ids::parse_path_ids;
///
/// assert_eq!(parse_path_ids("123, , 456"), vec!["123", "456"]);
/// assert!(parse_path_ids("").is_empty());
/// ```
pub fn parse_path_ids(segment: &str) -> Vec<&str> {
    segment
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Parse a path segment and coerce each token to an integer ID.
///
/// Tokens that are not integers are dropped.
pub fn path_ids(segment: &str) -> Vec<i64> {
    parse_path_ids(segment)
        .into_iter()
        .filter_map(|token| token.parse().ok())
        .collect()
}

/// Read a JSON number as an ID.
pub(crate) fn number_to_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(float_to_id)),
        _ => None,
    }
}

/// Narrow an ID list returned by AnkiConnect.
///
/// A `null` result is an empty list. Anything other than an array of
/// numbers is [`Error::UnexpectedFormat`].
pub fn narrow_ids(result: Value, action: &'static str) -> Result<Vec<i64>> {
    let entries = match result {
        Value::Null => return Ok(Vec::new()),
        Value::Array(entries) => entries,
        other => {
            return Err(Error::unexpected(
                action,
                format!("expected an array of IDs, got {}", kind_of(&other)),
            ));
        }
    };

    entries
        .iter()
        .map(|entry| {
            number_to_id(entry).ok_or_else(|| {
                Error::unexpected(action, format!("non-numeric ID {} in result", entry))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawId {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_untagged_forms() {
        assert_eq!(raw(json!(42)), RawId::Integer(42));
        assert_eq!(raw(json!(42.5)), RawId::Float(42.5));
        assert_eq!(raw(json!("42")), RawId::Text("42".into()));
        assert_eq!(raw(json!(true)), RawId::Other(json!(true)));
        assert_eq!(raw(json!(null)), RawId::Other(Value::Null));
    }

    #[test]
    fn test_all_forms_reach_same_canonical_id() {
        let batch = vec![
            raw(json!("1502298033753")),
            raw(json!(1502298033753.0)),
            raw(json!(1502298033753_i64)),
        ];
        assert_eq!(coerce_ids(&batch), vec![1502298033753; 3]);
    }

    #[test]
    fn test_unparseable_entries_are_dropped() {
        let batch = vec![
            raw(json!("abc")),
            raw(json!(7)),
            raw(json!({"id": 1})),
            raw(json!("")),
            raw(json!("8")),
        ];
        assert_eq!(coerce_ids(&batch), vec![7, 8]);
    }

    #[test]
    fn test_empty_or_all_bad_batch() {
        assert!(coerce_ids(&[]).is_empty());
        assert!(coerce_ids(&[raw(json!("x")), raw(json!(false))]).is_empty());
    }

    #[test]
    fn test_float_truncates_toward_zero() {
        assert_eq!(RawId::Float(12.9).canonical(), Some(12));
        assert_eq!(RawId::Float(-12.9).canonical(), Some(-12));
    }

    #[test]
    fn test_out_of_range_float_is_dropped() {
        assert_eq!(RawId::Float(f64::NAN).canonical(), None);
        assert_eq!(RawId::Float(f64::INFINITY).canonical(), None);
        assert_eq!(RawId::Float(1e19).canonical(), None);
    }

    #[test]
    fn test_text_is_not_trimmed_or_float_parsed() {
        assert_eq!(RawId::Text(" 5".into()).canonical(), None);
        assert_eq!(RawId::Text("5.0".into()).canonical(), None);
    }

    #[test]
    fn test_parse_path_ids() {
        assert!(parse_path_ids("").is_empty());
        assert_eq!(parse_path_ids("123"), vec!["123"]);
        assert_eq!(parse_path_ids("123,456"), vec!["123", "456"]);
        assert_eq!(parse_path_ids("123, 456, 789"), vec!["123", "456", "789"]);
        assert_eq!(parse_path_ids("123, , 456"), vec!["123", "456"]);
        assert_eq!(parse_path_ids(",,123,,"), vec!["123"]);
    }

    #[test]
    fn test_path_ids_drops_non_numeric() {
        assert_eq!(path_ids("1, two, 3"), vec![1, 3]);
    }

    #[test]
    fn test_narrow_ids() {
        assert_eq!(narrow_ids(json!([1, 2.0, 3]), "findCards").unwrap(), vec![1, 2, 3]);
        assert!(narrow_ids(Value::Null, "findCards").unwrap().is_empty());
    }

    #[test]
    fn test_narrow_ids_rejects_non_numeric() {
        let err = narrow_ids(json!([1, "2"]), "findNotes").unwrap_err();
        assert!(matches!(err, Error::UnexpectedFormat { action: "findNotes", .. }));

        let err = narrow_ids(json!({"ids": []}), "findNotes").unwrap_err();
        assert!(matches!(err, Error::UnexpectedFormat { .. }));
    }
}

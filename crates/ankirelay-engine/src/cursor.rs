//! Opaque pagination cursors.
//!
//! A cursor is the compact JSON text of a field map, base64-encoded with the
//! standard padded alphabet. Decoding is the exact inverse; anything that is
//! not valid base64 of a JSON object is [`Error::InvalidCursor`].

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::response::kind_of;

/// The fields carried by a cursor.
pub type CursorFields = Map<String, Value>;

/// Encode cursor fields into an opaque string.
pub fn encode(fields: &CursorFields) -> String {
    STANDARD.encode(Value::Object(fields.clone()).to_string())
}

/// Decode a cursor produced by [`encode`].
pub fn decode(cursor: &str) -> Result<CursorFields> {
    let bytes = STANDARD
        .decode(cursor)
        .map_err(|e| Error::InvalidCursor(e.to_string()))?;

    match serde_json::from_slice(&bytes) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(Error::InvalidCursor(format!(
            "expected an object, got {}",
            kind_of(&other)
        ))),
        Err(e) => Err(Error::InvalidCursor(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn fields(value: Value) -> CursorFields {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_round_trip_with_extra_fields() {
        let original = fields(json!({"start_index": 50, "test": "value"}));
        let decoded = decode(&encode(&original)).unwrap();
        assert_eq!(decoded["start_index"], json!(50));
        assert_eq!(decoded["test"], json!("value"));
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_uses_standard_padded_alphabet() {
        assert_eq!(encode(&fields(json!({"start_index": 3}))), "eyJzdGFydF9pbmRleCI6M30=");
    }

    #[test]
    fn test_empty_map() {
        assert!(decode(&encode(&CursorFields::new())).unwrap().is_empty());
    }

    #[test]
    fn test_not_base64() {
        assert!(matches!(decode("not base64!"), Err(Error::InvalidCursor(_))));
    }

    #[test]
    fn test_truncated() {
        let cursor = encode(&fields(json!({"start_index": 100})));
        let truncated = &cursor[..cursor.len() - 4];
        assert!(matches!(decode(truncated), Err(Error::InvalidCursor(_))));
    }

    #[test]
    fn test_non_object_payload() {
        let cursor = STANDARD.encode("[1,2,3]");
        let err = decode(&cursor).unwrap_err();
        assert_eq!(err.to_string(), "invalid cursor: expected an object, got an array");
    }

    #[test]
    fn test_invalid_json_payload() {
        let cursor = STANDARD.encode("{start_index:");
        assert!(matches!(decode(&cursor), Err(Error::InvalidCursor(_))));
    }

    #[test]
    fn test_float_survives_exactly() {
        let original = fields(json!({"x": 1.1562176016017037e-265, "y": 0.1, "z": -2.5e300}));
        assert_eq!(decode(&encode(&original)).unwrap(), original);
    }

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            any::<u64>().prop_map(Value::from),
            any::<f64>()
                .prop_filter("finite", |f| f.is_finite())
                .prop_map(Value::from),
            ".*".prop_map(Value::from),
        ]
    }

    proptest! {
        #[test]
        fn prop_round_trip(map in prop::collection::btree_map(".*", scalar(), 0..8)) {
            let original: CursorFields = map.into_iter().collect();
            prop_assert_eq!(decode(&encode(&original)).unwrap(), original);
        }
    }
}

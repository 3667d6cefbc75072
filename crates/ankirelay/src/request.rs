//! Wire types for the AnkiConnect protocol.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The AnkiConnect API version every request declares.
pub const API_VERSION: u8 = 6;

/// The request format expected by AnkiConnect.
///
/// `params` is always a JSON object; actions without parameters send `{}`.
#[derive(Debug, Serialize)]
pub(crate) struct AnkiRequest<'a> {
    /// The action to perform.
    pub action: &'a str,
    /// The API version (always 6).
    pub version: u8,
    /// Optional API key for authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<&'a str>,
    /// Parameters for the action.
    pub params: Value,
}

impl<'a> AnkiRequest<'a> {
    pub fn new(action: &'a str, params: Value, key: Option<&'a str>) -> Self {
        Self {
            action,
            version: API_VERSION,
            key,
            params,
        }
    }
}

/// The raw response body returned by AnkiConnect.
///
/// Both fields may be missing or `null`; [`Envelope`] gives them meaning.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AnkiResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A decoded AnkiConnect response.
///
/// AnkiConnect reports failure only through a non-empty `error` string. A
/// missing, `null` or empty `error` is success even when `result` is `null`,
/// so "backend returned nothing" is `Success(Value::Null)` and never confused
/// with a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// The action succeeded with this result (possibly `null`).
    Success(Value),
    /// The action failed with this message.
    Failure(String),
}

impl From<AnkiResponse> for Envelope {
    fn from(response: AnkiResponse) -> Self {
        match response.error {
            Some(message) if !message.is_empty() => Envelope::Failure(message),
            _ => Envelope::Success(response.result.unwrap_or(Value::Null)),
        }
    }
}

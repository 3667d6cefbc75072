//! Error types for the ankirelay crate.
//!
//! Every failed call falls into one of three families:
//!
//! - **Transport**: the request never produced a usable envelope
//!   ([`Error::Http`], [`Error::ConnectionRefused`], [`Error::Json`],
//!   [`Error::InvalidParams`])
//! - **Cancelled**: the caller gave up or the client timeout elapsed
//!   ([`Error::Cancelled`], [`Error::TimedOut`])
//! - **Backend**: AnkiConnect answered with a non-empty error string
//!   ([`Error::AnkiConnect`])
//!
//! # Example
//!
//! ```no_run
//! use ankirelay::{AnkiClient, Error};
//!
//! # async fn example() -> ankirelay::Result<()> {
//! let client = AnkiClient::new()?;
//!
//! match client.misc().version().await {
//!     Ok(version) => println!("AnkiConnect v{}", version),
//!     Err(Error::ConnectionRefused) => eprintln!("Please start Anki with AnkiConnect installed"),
//!     Err(e) if e.is_backend() => eprintln!("AnkiConnect refused: {}", e),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use thiserror::Error;

/// The error type for AnkiConnect calls.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP/network error from reqwest, including non-success status codes.
    ///
    /// For connection issues, see [`Error::ConnectionRefused`].
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection refused - Anki is likely not running.
    ///
    /// This error occurs when:
    /// - Anki is not running
    /// - The AnkiConnect add-on is not installed
    /// - AnkiConnect is listening on a different address
    #[error("Could not connect to Anki. Is Anki running with AnkiConnect installed?")]
    ConnectionRefused,

    /// The response body was not a decodable envelope.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Action parameters did not serialize to a JSON object.
    #[error("invalid parameters for {action}: expected a JSON object, got {found}")]
    InvalidParams {
        /// The action being called.
        action: String,
        /// The JSON type the parameters serialized to.
        found: &'static str,
    },

    /// The caller cancelled the call before AnkiConnect responded.
    #[error("request cancelled before AnkiConnect responded")]
    Cancelled,

    /// AnkiConnect did not respond within the client timeout.
    #[error("request timed out after {0:?}")]
    TimedOut(Duration),

    /// AnkiConnect returned an error message.
    ///
    /// The message is passed through exactly as AnkiConnect sent it, e.g.
    /// "cannot create note because it is a duplicate" or "deck was not found".
    #[error("AnkiConnect error: {0}")]
    AnkiConnect(String),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// True when the request never produced a usable response envelope.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::ConnectionRefused | Error::Json(_) | Error::InvalidParams { .. }
        )
    }

    /// True when the call was abandoned by cancellation or timeout.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled | Error::TimedOut(_))
    }

    /// True when AnkiConnect itself reported the failure.
    pub fn is_backend(&self) -> bool {
        matches!(self, Error::AnkiConnect(_))
    }
}

/// A specialized Result type for AnkiConnect calls.
pub type Result<T> = std::result::Result<T, Error>;

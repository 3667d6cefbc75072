//! Error types for ankirelay-engine.
//!
//! Every handler failure lands in one of five variants:
//!
//! 1. [`Error::Validation`]: bad input, reported before any backend call
//! 2. [`Error::Client`]: the AnkiConnect call failed, prefixed with what the
//!    handler was doing
//! 3. [`Error::UnexpectedFormat`]: AnkiConnect answered with a shape the
//!    handler cannot interpret
//! 4. [`Error::InvalidCursor`]: a pagination cursor did not decode
//! 5. [`Error::NotFound`]: a single-record read matched nothing
//!
//! # Example
//!
//! ```no_run
//! use ankirelay_engine::{Engine, Error, search::SearchMode};
//!
//! # async fn example() -> ankirelay_engine::Result<()> {
//! let engine = Engine::new()?;
//!
//! match engine.search().run("deck:Default", SearchMode::Cards, None).await {
//!     Ok(results) => println!("{} cards", results.total_found),
//!     Err(e) if e.is_cancelled() => eprintln!("Request abandoned"),
//!     Err(e) => eprintln!("{}", e),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Result type for ankirelay-engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while handling an operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller input was rejected without contacting AnkiConnect.
    #[error("{0}")]
    Validation(String),

    /// An AnkiConnect call failed.
    #[error("{context}: {source}")]
    Client {
        /// What the handler was doing, e.g. "Error finding cards".
        context: &'static str,
        /// The underlying client error, unchanged.
        #[source]
        source: ankirelay::Error,
    },

    /// AnkiConnect returned a result the handler cannot interpret.
    #[error("unexpected response format from {action}: {detail}")]
    UnexpectedFormat {
        /// The action whose result was malformed.
        action: &'static str,
        /// What was wrong with it.
        detail: String,
    },

    /// A pagination cursor could not be decoded.
    #[error("invalid cursor: {0}")]
    InvalidCursor(String),

    /// A single requested record does not exist.
    #[error("{0}")]
    NotFound(String),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub(crate) fn unexpected(action: &'static str, detail: impl Into<String>) -> Self {
        Error::UnexpectedFormat {
            action,
            detail: detail.into(),
        }
    }

    /// Returns true if input validation failed.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Returns true if the request was cancelled or timed out.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Client { source, .. } if source.is_cancelled())
    }
}

/// Attach operation context to client results.
pub(crate) trait ClientContext<T> {
    fn context(self, context: &'static str) -> Result<T>;
}

impl<T> ClientContext<T> for ankirelay::Result<T> {
    fn context(self, context: &'static str) -> Result<T> {
        self.map_err(|source| Error::Client { context, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_is_prefixed() {
        let result: ankirelay::Result<()> = Err(ankirelay::Error::AnkiConnect("deck missing".into()));
        let err = result.context("Error getting deck config").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error getting deck config: AnkiConnect error: deck missing"
        );
        assert!(!err.is_cancelled());
    }

    #[test]
    fn test_cancelled_client_error() {
        let result: ankirelay::Result<()> = Err(ankirelay::Error::Cancelled);
        assert!(result.context("Error finding notes").unwrap_err().is_cancelled());
    }

    #[test]
    fn test_unexpected_format_message() {
        let err = Error::unexpected("cardsInfo", "expected an array, got a string");
        assert_eq!(
            err.to_string(),
            "unexpected response format from cardsInfo: expected an array, got a string"
        );
    }
}

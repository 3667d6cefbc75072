//! Miscellaneous AnkiConnect actions.

use serde_json::Value;

use crate::client::AnkiClient;
use crate::error::Result;

/// Provides access to miscellaneous AnkiConnect operations.
///
/// Obtained via [`AnkiClient::misc()`].
#[derive(Debug)]
pub struct MiscActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

impl<'a> MiscActions<'a> {
    /// Get the AnkiConnect API version.
    ///
    /// Useful as a reachability probe.
    pub async fn version(&self) -> Result<Value> {
        self.client.call_without_params("version").await
    }
}

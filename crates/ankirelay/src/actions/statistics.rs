//! Statistics-related AnkiConnect actions.

use serde::Serialize;
use serde_json::Value;

use crate::client::AnkiClient;
use crate::error::Result;

/// Provides access to statistics-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::statistics()`].
#[derive(Debug)]
pub struct StatisticsActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionStatsParams {
    whole_collection: bool,
}

impl<'a> StatisticsActions<'a> {
    /// Get the collection statistics report as HTML.
    ///
    /// With `whole_collection` false the report covers the current deck only.
    pub async fn collection_stats_html(&self, whole_collection: bool) -> Result<Value> {
        self.client
            .call(
                "getCollectionStatsHTML",
                CollectionStatsParams { whole_collection },
            )
            .await
    }

    /// Get the number of cards reviewed today.
    pub async fn cards_reviewed_today(&self) -> Result<Value> {
        self.client
            .call_without_params("getNumCardsReviewedToday")
            .await
    }
}

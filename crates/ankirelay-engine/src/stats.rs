//! Collection statistics.

use ankirelay::AnkiClient;
use chrono::{Local, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::{ClientContext, Error, Result};
use crate::response::kind_of;

/// The collection statistics report.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionStats {
    /// The report as rendered by Anki.
    pub stats_html: String,
    /// Unix timestamp (seconds) of when the report was fetched.
    pub generated_at: i64,
}

/// Today's review count.
#[derive(Debug, Clone, Serialize)]
pub struct DailyStats {
    /// Cards reviewed today.
    pub today: u64,
    /// Local date, `YYYY-MM-DD`.
    pub date: String,
}

/// Statistics workflow engine.
#[derive(Debug)]
pub struct StatsEngine<'a> {
    client: &'a AnkiClient,
}

impl<'a> StatsEngine<'a> {
    pub(crate) fn new(client: &'a AnkiClient) -> Self {
        Self { client }
    }

    /// Fetch the whole-collection statistics report.
    pub async fn collection(&self) -> Result<CollectionStats> {
        let result = self
            .client
            .statistics()
            .collection_stats_html(true)
            .await
            .context("Error getting collection stats")?;

        let stats_html = match result {
            Value::Null => String::new(),
            Value::String(html) => html,
            other => {
                return Err(Error::unexpected(
                    "getCollectionStatsHTML",
                    format!("expected a string, got {}", kind_of(&other)),
                ));
            }
        };

        Ok(CollectionStats {
            stats_html,
            generated_at: Utc::now().timestamp(),
        })
    }

    /// Fetch the number of cards reviewed today.
    pub async fn daily(&self) -> Result<DailyStats> {
        let result = self
            .client
            .statistics()
            .cards_reviewed_today()
            .await
            .context("Error getting daily stats")?;

        let today = match &result {
            Value::Null => 0,
            Value::Number(n) => n.as_u64().ok_or_else(|| {
                Error::unexpected("getNumCardsReviewedToday", format!("invalid count {}", n))
            })?,
            other => {
                return Err(Error::unexpected(
                    "getNumCardsReviewedToday",
                    format!("expected a number, got {}", kind_of(other)),
                ));
            }
        };

        Ok(DailyStats {
            today,
            date: Local::now().format("%Y-%m-%d").to_string(),
        })
    }
}

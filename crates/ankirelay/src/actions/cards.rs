//! Card-related AnkiConnect actions.
//!
//! Cards are generated from notes; one note can produce several cards. All
//! methods return the raw AnkiConnect result so callers can pass card
//! records through without reshaping them.
//!
//! # Example
//!
//! ```no_run
//! use ankirelay::AnkiClient;
//!
//! # async fn example() -> ankirelay::Result<()> {
//! let client = AnkiClient::new()?;
//!
//! let due = client.cards().find("is:due").await?;
//! println!("Due cards: {}", due);
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::client::AnkiClient;
use crate::error::Result;

/// Provides access to card-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::cards()`].
#[derive(Debug)]
pub struct CardActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
struct FindCardsParams<'a> {
    query: &'a str,
}

#[derive(Serialize)]
struct CardsParams<'a> {
    cards: &'a [i64],
}

#[derive(Serialize)]
struct SetDueDateParams<'a> {
    cards: &'a [i64],
    days: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SetEaseFactorsParams<'a> {
    cards: &'a [i64],
    ease_factors: &'a [i64],
}

impl<'a> CardActions<'a> {
    /// Find cards matching a query in Anki search syntax.
    ///
    /// AnkiConnect answers with an array of card IDs.
    pub async fn find(&self, query: &str) -> Result<Value> {
        self.client
            .call("findCards", FindCardsParams { query })
            .await
    }

    /// Get detailed information about cards.
    pub async fn info(&self, card_ids: &[i64]) -> Result<Value> {
        self.client
            .call("cardsInfo", CardsParams { cards: card_ids })
            .await
    }

    /// Suspend cards. AnkiConnect answers `true` if any card changed.
    pub async fn suspend(&self, card_ids: &[i64]) -> Result<Value> {
        self.client
            .call("suspend", CardsParams { cards: card_ids })
            .await
    }

    /// Unsuspend cards. AnkiConnect answers `true` if any card changed.
    pub async fn unsuspend(&self, card_ids: &[i64]) -> Result<Value> {
        self.client
            .call("unsuspend", CardsParams { cards: card_ids })
            .await
    }

    /// Reset cards to the new state.
    pub async fn forget(&self, card_ids: &[i64]) -> Result<Value> {
        self.client
            .call("forgetCards", CardsParams { cards: card_ids })
            .await
    }

    /// Put cards back into the learning queue.
    pub async fn relearn(&self, card_ids: &[i64]) -> Result<Value> {
        self.client
            .call("relearnCards", CardsParams { cards: card_ids })
            .await
    }

    /// Set the due date of cards.
    ///
    /// `days` uses Anki's syntax: `"0"` (today), `"1!"` (tomorrow and reset
    /// interval), `"3-7"` (random range).
    pub async fn set_due_date(&self, card_ids: &[i64], days: &str) -> Result<Value> {
        self.client
            .call(
                "setDueDate",
                SetDueDateParams {
                    cards: card_ids,
                    days,
                },
            )
            .await
    }

    /// Set ease factors, one per card (e.g. 2500 = 250%).
    pub async fn set_ease(&self, card_ids: &[i64], ease_factors: &[i64]) -> Result<Value> {
        self.client
            .call(
                "setEaseFactors",
                SetEaseFactorsParams {
                    cards: card_ids,
                    ease_factors,
                },
            )
            .await
    }

    /// Get the review log of each card, keyed by card ID.
    pub async fn reviews(&self, card_ids: &[i64]) -> Result<Value> {
        self.client
            .call("getReviewsOfCards", CardsParams { cards: card_ids })
            .await
    }
}

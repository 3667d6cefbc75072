//! Card state changes and card lookups.

use std::str::FromStr;

use ankirelay::AnkiClient;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ClientContext, Error, Result};
use crate::ids::{RawId, coerce_ids, parse_path_ids, path_ids};
use crate::response;

/// Card state action selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStateAction {
    /// `suspend`
    Suspend,
    /// `unsuspend`
    Unsuspend,
    /// `forget`
    Forget,
    /// `relearn`
    Relearn,
    /// `set_due`, needs `days`
    SetDue,
    /// `set_ease`, needs one ease factor per card
    SetEase,
}

impl FromStr for CardStateAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "suspend" => Ok(CardStateAction::Suspend),
            "unsuspend" => Ok(CardStateAction::Unsuspend),
            "forget" => Ok(CardStateAction::Forget),
            "relearn" => Ok(CardStateAction::Relearn),
            "set_due" => Ok(CardStateAction::SetDue),
            "set_ease" => Ok(CardStateAction::SetEase),
            _ => Err(Error::validation(format!(
                "Invalid action: {}. Must be one of: suspend, unsuspend, forget, relearn, set_due, set_ease",
                s
            ))),
        }
    }
}

/// A validated card state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardStateChange {
    /// Suspend cards.
    Suspend,
    /// Unsuspend cards.
    Unsuspend,
    /// Reset cards to new.
    Forget,
    /// Move cards back into learning.
    Relearn,
    /// Set due dates using Anki's day syntax (`"0"`, `"1!"`, `"3-7"`).
    SetDue(String),
    /// Set one ease factor per card (2500 = 250%).
    SetEase(Vec<i64>),
}

impl CardStateChange {
    /// Build a change from a selector and its optional arguments.
    ///
    /// `set_due` needs non-empty `days` and `set_ease` needs `ease_factors`.
    /// Other arguments are ignored.
    pub fn from_request(
        action: CardStateAction,
        days: Option<&str>,
        ease_factors: Option<&[i64]>,
    ) -> Result<Self> {
        Ok(match action {
            CardStateAction::Suspend => CardStateChange::Suspend,
            CardStateAction::Unsuspend => CardStateChange::Unsuspend,
            CardStateAction::Forget => CardStateChange::Forget,
            CardStateAction::Relearn => CardStateChange::Relearn,
            CardStateAction::SetDue => match days {
                Some(days) if !days.is_empty() => CardStateChange::SetDue(days.to_string()),
                _ => {
                    return Err(Error::validation(
                        "days parameter required for set_due action",
                    ));
                }
            },
            CardStateAction::SetEase => {
                CardStateChange::SetEase(ease_factors.unwrap_or_default().to_vec())
            }
        })
    }
}

/// Card workflow engine.
#[derive(Debug)]
pub struct CardEngine<'a> {
    client: &'a AnkiClient,
}

impl<'a> CardEngine<'a> {
    pub(crate) fn new(client: &'a AnkiClient) -> Self {
        Self { client }
    }

    /// Apply a state change to cards.
    ///
    /// IDs that do not parse are dropped before the call. For `set_ease` the
    /// number of ease factors must equal the number of coerced IDs.
    ///
    /// Suspend, unsuspend, set_due and set_ease return AnkiConnect's result.
    /// Forget and relearn return `true`.
    pub async fn change_state(&self, card_ids: &[RawId], change: &CardStateChange) -> Result<Value> {
        let ids = coerce_ids(card_ids);
        if let CardStateChange::SetEase(factors) = change {
            if factors.len() != ids.len() {
                return Err(Error::validation(
                    "ease_factors must match card_ids length for set_ease action",
                ));
            }
        }

        debug!(count = ids.len(), ?change, "Changing card state");
        let cards = self.client.cards();
        let result = match change {
            CardStateChange::Suspend => cards.suspend(&ids).await,
            CardStateChange::Unsuspend => cards.unsuspend(&ids).await,
            CardStateChange::Forget => cards.forget(&ids).await.map(|_| Value::Bool(true)),
            CardStateChange::Relearn => cards.relearn(&ids).await.map(|_| Value::Bool(true)),
            CardStateChange::SetDue(days) => cards.set_due_date(&ids, days).await,
            CardStateChange::SetEase(factors) => cards.set_ease(&ids, factors).await,
        }
        .context("Error changing card state")?;

        info!(count = ids.len(), "Card state changed");
        Ok(result)
    }

    /// Look up cards named by a comma-separated path segment.
    ///
    /// With one ID the single record is returned, or [`Error::NotFound`].
    /// With several the list is returned as-is.
    pub async fn info(&self, segment: &str) -> Result<Value> {
        let ids = segment_ids(segment)?;
        let result = self
            .client
            .cards()
            .info(&ids)
            .await
            .context("Error getting cards info")?;
        response::collapse(response::list(result, "cardsInfo")?, &ids, "card")
    }

    /// Get the review history of cards named by a path segment.
    pub async fn reviews(&self, segment: &str) -> Result<Value> {
        let ids = segment_ids(segment)?;
        let result = self
            .client
            .cards()
            .reviews(&ids)
            .await
            .context("Error getting card reviews")?;
        Ok(response::or_empty(result, Value::Array(Vec::new())))
    }
}

fn segment_ids(segment: &str) -> Result<Vec<i64>> {
    if parse_path_ids(segment).is_empty() {
        return Err(Error::validation("no card IDs provided"));
    }
    Ok(path_ids(segment))
}

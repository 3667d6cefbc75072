//! Deck listing, options groups and statistics.

use ankirelay::AnkiClient;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{ClientContext, Error, Result};
use crate::ids::number_to_id;
use crate::response;

/// A deck name and its ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeckEntry {
    /// Full deck name, e.g. `Japanese::Vocabulary`.
    pub name: String,
    /// Deck ID.
    pub id: i64,
}

/// Deck workflow engine.
#[derive(Debug)]
pub struct DeckEngine<'a> {
    client: &'a AnkiClient,
}

impl<'a> DeckEngine<'a> {
    pub(crate) fn new(client: &'a AnkiClient) -> Self {
        Self { client }
    }

    /// List every deck, sorted by name.
    pub async fn list(&self) -> Result<Vec<DeckEntry>> {
        let result = self
            .client
            .decks()
            .names_and_ids()
            .await
            .context("Error listing decks")?;

        let mut decks = response::object(result, "deckNamesAndIds")?
            .into_iter()
            .map(|(name, id)| match number_to_id(&id) {
                Some(id) => Ok(DeckEntry { name, id }),
                None => Err(Error::unexpected(
                    "deckNamesAndIds",
                    format!("deck '{}' has non-numeric ID {}", name, id),
                )),
            })
            .collect::<Result<Vec<_>>>()?;
        decks.sort_by(|a, b| a.name.cmp(&b.name));

        debug!(count = decks.len(), "Listed decks");
        Ok(decks)
    }

    /// Get the options group of a deck.
    ///
    /// `deck` is passed through unchanged, so it may be a name or an ID.
    pub async fn config(&self, deck: &str) -> Result<Value> {
        let result = self
            .client
            .decks()
            .config(deck)
            .await
            .context("Error getting deck config")?;
        Ok(response::or_empty(result, Value::Object(Map::new())))
    }

    /// Get statistics for a deck, keyed by deck ID.
    pub async fn stats(&self, deck: &str) -> Result<Value> {
        let result = self
            .client
            .decks()
            .stats(&[deck])
            .await
            .context("Error getting deck stats")?;
        Ok(response::or_empty(result, Value::Object(Map::new())))
    }

    /// Save an options group and return AnkiConnect's result.
    pub async fn update_config(&self, config: &Map<String, Value>) -> Result<Value> {
        debug!(config_id = ?config.get("id"), "Saving deck config");
        let result = self
            .client
            .decks()
            .save_config(config)
            .await
            .context("Error updating deck config")?;
        info!("Deck config saved");
        Ok(result)
    }
}

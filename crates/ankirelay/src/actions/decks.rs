//! Deck-related AnkiConnect actions.

use serde::Serialize;
use serde_json::Value;

use crate::client::AnkiClient;
use crate::error::Result;

/// Provides access to deck-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::decks()`].
#[derive(Debug)]
pub struct DeckActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
struct GetDeckConfigParams<'a> {
    deck: &'a str,
}

#[derive(Serialize)]
struct SaveDeckConfigParams<'a, C> {
    config: &'a C,
}

#[derive(Serialize)]
struct GetDeckStatsParams<'a> {
    decks: &'a [&'a str],
}

impl<'a> DeckActions<'a> {
    /// Get a `{name: id}` map of every deck.
    pub async fn names_and_ids(&self) -> Result<Value> {
        self.client.call_without_params("deckNamesAndIds").await
    }

    /// Get the options group of a deck, addressed by name.
    pub async fn config(&self, deck: &str) -> Result<Value> {
        self.client
            .call("getDeckConfig", GetDeckConfigParams { deck })
            .await
    }

    /// Save an options group. The config must carry its `id`.
    pub async fn save_config<C>(&self, config: &C) -> Result<Value>
    where
        C: Serialize,
    {
        self.client
            .call("saveDeckConfig", SaveDeckConfigParams { config })
            .await
    }

    /// Get statistics for decks, keyed by deck ID.
    pub async fn stats(&self, decks: &[&str]) -> Result<Value> {
        self.client
            .call("getDeckStats", GetDeckStatsParams { decks })
            .await
    }
}

//! Request shaping and pagination over AnkiConnect.
//!
//! This crate sits between a tool/resource front end and the [`ankirelay`]
//! client. Each operation validates and coerces its inputs, issues one or
//! more AnkiConnect calls, and returns a structured result or an [`Error`].
//!
//! # Quick Start
//!
//! ```no_run
//! use ankirelay_engine::{Engine, search::SearchMode};
//!
//! # async fn example() -> ankirelay_engine::Result<()> {
//! let engine = Engine::new()?;
//!
//! let page = engine.search().run("deck:Japanese", SearchMode::Cards, None).await?;
//! println!("{} of {} cards", page.items.len(), page.total_found);
//!
//! let decks = engine.decks().list().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`ids`] - identifier coercion and path ID parsing
//! - [`cursor`] - opaque pagination cursors
//! - [`paginate`] - cutting pages from result lists
//! - [`search`], [`notes`], [`tags`], [`cards`], [`decks`], [`models`],
//!   [`gui`], [`stats`] - operation handlers

mod error;
mod response;

pub mod cards;
pub mod cursor;
pub mod decks;
pub mod gui;
pub mod ids;
pub mod models;
pub mod notes;
pub mod paginate;
pub mod search;
pub mod stats;
pub mod tags;

pub use error::{Error, Result};

pub use ankirelay::{AnkiClient, CancellationToken, ClientBuilder};

use cards::CardEngine;
use decks::DeckEngine;
use gui::GuiEngine;
use models::ModelEngine;
use notes::NoteEngine;
use search::SearchEngine;
use stats::StatsEngine;
use tags::TagEngine;

/// Operation engine for AnkiConnect.
///
/// The engine wraps an [`AnkiClient`] and hands out per-domain engines that
/// borrow it. It holds no other state, so clones are cheap and independent.
///
/// # Example
///
/// ```no_run
/// use ankirelay_engine::{CancellationToken, ClientBuilder, Engine};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ClientBuilder::new().url("http://localhost:8765").build()?;
/// let engine = Engine::from_client(client);
///
/// // Scope one request's calls to a cancellation token
/// let token = CancellationToken::new();
/// let scoped = engine.with_cancellation(token.clone());
/// let tags = scoped.tags().list().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    client: AnkiClient,
}

impl Engine {
    /// Create an engine with default client settings.
    ///
    /// Connects to AnkiConnect at `http://localhost:8765`.
    pub fn new() -> Result<Self> {
        let client = AnkiClient::new().map_err(|source| Error::Client {
            context: "Error creating client",
            source,
        })?;
        Ok(Self { client })
    }

    /// Create an engine from an existing client.
    pub fn from_client(client: AnkiClient) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying client.
    pub fn client(&self) -> &AnkiClient {
        &self.client
    }

    /// Return an engine whose calls are abandoned once `token` is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            client: self.client.with_cancellation(token),
        }
    }

    /// Access paginated search.
    pub fn search(&self) -> SearchEngine<'_> {
        SearchEngine::new(&self.client)
    }

    /// Access note creation, update, deletion and lookup.
    pub fn notes(&self) -> NoteEngine<'_> {
        NoteEngine::new(&self.client)
    }

    /// Access tag management.
    pub fn tags(&self) -> TagEngine<'_> {
        TagEngine::new(&self.client)
    }

    /// Access card state changes and lookups.
    pub fn cards(&self) -> CardEngine<'_> {
        CardEngine::new(&self.client)
    }

    /// Access deck listing, options and statistics.
    pub fn decks(&self) -> DeckEngine<'_> {
        DeckEngine::new(&self.client)
    }

    /// Access model definitions.
    pub fn models(&self) -> ModelEngine<'_> {
        ModelEngine::new(&self.client)
    }

    /// Access reviewer control.
    pub fn gui(&self) -> GuiEngine<'_> {
        GuiEngine::new(&self.client)
    }

    /// Access collection statistics.
    pub fn stats(&self) -> StatsEngine<'_> {
        StatsEngine::new(&self.client)
    }
}

//! # ankirelay
//!
//! An async client for the [AnkiConnect](https://foosoft.net/projects/anki-connect/)
//! JSON-RPC API.
//!
//! Every call posts `{action, version: 6, params}` to the AnkiConnect endpoint
//! and unwraps the `{result, error}` envelope. A non-empty `error` becomes
//! [`Error::AnkiConnect`]; otherwise the raw `result` is returned.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ankirelay::AnkiClient;
//!
//! #[tokio::main]
//! async fn main() -> ankirelay::Result<()> {
//!     let client = AnkiClient::new()?;
//!
//!     let decks = client.decks().names_and_ids().await?;
//!     println!("Decks: {}", decks);
//!
//!     let cards = client.cards().find("deck:Default is:due").await?;
//!     println!("Due cards: {}", cards);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Cancellation
//!
//! Calls can be tied to a [`CancellationToken`] with
//! [`AnkiClient::with_cancellation`]. Cancelling the token abandons any call in
//! flight and fails later calls with [`Error::Cancelled`].
//!
//! ## Action Groups
//!
//! | Group | Access | Description |
//! |-------|--------|-------------|
//! | Cards | [`AnkiClient::cards()`] | Find, inspect, suspend and reschedule cards |
//! | Notes | [`AnkiClient::notes()`] | Add, update, delete and tag notes |
//! | Decks | [`AnkiClient::decks()`] | Deck listing, options groups, statistics |
//! | Models | [`AnkiClient::models()`] | Note type definitions |
//! | GUI | [`AnkiClient::gui()`] | Drive the reviewer window |
//! | Statistics | [`AnkiClient::statistics()`] | Collection statistics |
//! | Misc | [`AnkiClient::misc()`] | Version probe |

pub mod actions;
mod client;
mod error;
mod request;

pub use client::{AnkiClient, ClientBuilder, DEFAULT_TIMEOUT, DEFAULT_URL};
pub use error::{Error, Result};
pub use request::{API_VERSION, Envelope};
pub use tokio_util::sync::CancellationToken;

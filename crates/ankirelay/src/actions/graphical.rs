//! GUI-related AnkiConnect actions.
//!
//! These drive Anki's reviewer window. They only succeed while the desktop
//! application is open; `current_card` answers `null` outside a review.

use serde::Serialize;
use serde_json::Value;

use crate::client::AnkiClient;
use crate::error::Result;

/// Provides access to GUI-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::gui()`].
#[derive(Debug)]
pub struct GuiActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
struct AnswerCardParams {
    ease: u8,
}

impl<'a> GuiActions<'a> {
    /// Get the card shown in the reviewer, or `null` when not reviewing.
    pub async fn current_card(&self) -> Result<Value> {
        self.client.call_without_params("guiCurrentCard").await
    }

    /// Reveal the answer side of the current card.
    pub async fn show_answer(&self) -> Result<Value> {
        self.client.call_without_params("guiShowAnswer").await
    }

    /// Answer the current card.
    ///
    /// `ease` is 1 (Again), 2 (Hard), 3 (Good) or 4 (Easy). The answer must
    /// be visible first; see [`show_answer`](Self::show_answer).
    pub async fn answer_card(&self, ease: u8) -> Result<Value> {
        self.client
            .call("guiAnswerCard", AnswerCardParams { ease })
            .await
    }

    /// Undo the last review action.
    pub async fn undo(&self) -> Result<Value> {
        self.client.call_without_params("guiUndo").await
    }
}

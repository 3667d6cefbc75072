//! Reviewer control.
//!
//! These calls drive Anki's review window and fail unless the desktop
//! application is open.

use std::str::FromStr;

use ankirelay::AnkiClient;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ClientContext, Error, Result};

/// How well a card was recalled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Ease {
    /// Forgotten; the card goes back into learning.
    Again = 1,
    /// Recalled with difficulty.
    Hard = 2,
    /// Recalled.
    Good = 3,
    /// Recalled without effort.
    Easy = 4,
}

impl Ease {
    /// The grade AnkiConnect expects.
    pub fn grade(self) -> u8 {
        self as u8
    }
}

impl TryFrom<i64> for Ease {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            1 => Ok(Ease::Again),
            2 => Ok(Ease::Hard),
            3 => Ok(Ease::Good),
            4 => Ok(Ease::Easy),
            _ => Err(Error::validation(
                "ease must be 1 (Again), 2 (Hard), 3 (Good), or 4 (Easy)",
            )),
        }
    }
}

/// GUI action selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuiAction {
    /// `current_card`
    CurrentCard,
    /// `show_answer`
    ShowAnswer,
    /// `answer`, needs `ease`
    Answer,
    /// `undo`
    Undo,
}

impl FromStr for GuiAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "current_card" => Ok(GuiAction::CurrentCard),
            "show_answer" => Ok(GuiAction::ShowAnswer),
            "answer" => Ok(GuiAction::Answer),
            "undo" => Ok(GuiAction::Undo),
            _ => Err(Error::validation(format!(
                "Invalid action: {}. Available actions are: current_card, show_answer, answer, undo",
                s
            ))),
        }
    }
}

/// A validated GUI command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuiCommand {
    /// Get the card under review.
    CurrentCard,
    /// Reveal the answer.
    ShowAnswer,
    /// Reveal the answer, then grade the card.
    Answer(Ease),
    /// Undo the last review.
    Undo,
}

impl GuiCommand {
    /// Build a command from a selector and an optional grade.
    ///
    /// `answer` needs a grade between 1 and 4.
    pub fn from_request(action: GuiAction, ease: Option<i64>) -> Result<Self> {
        Ok(match action {
            GuiAction::CurrentCard => GuiCommand::CurrentCard,
            GuiAction::ShowAnswer => GuiCommand::ShowAnswer,
            GuiAction::Answer => {
                let ease = ease.ok_or_else(|| {
                    Error::validation("ease parameter required for answer action")
                })?;
                GuiCommand::Answer(Ease::try_from(ease)?)
            }
            GuiAction::Undo => GuiCommand::Undo,
        })
    }

    /// Returns true if the command changes collection state.
    pub fn is_mutation(self) -> bool {
        matches!(self, GuiCommand::Answer(_) | GuiCommand::Undo)
    }
}

/// The review session as seen right now.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    /// The card under review, or `null` outside a review.
    pub current_card: Value,
    /// Unix timestamp (seconds) of the snapshot.
    pub timestamp: i64,
}

/// GUI workflow engine.
#[derive(Debug)]
pub struct GuiEngine<'a> {
    client: &'a AnkiClient,
}

impl<'a> GuiEngine<'a> {
    pub(crate) fn new(client: &'a AnkiClient) -> Self {
        Self { client }
    }

    /// Run a command and return AnkiConnect's result.
    ///
    /// `Answer` first reveals the answer; the grade is only sent once that
    /// succeeded.
    pub async fn run(&self, command: GuiCommand) -> Result<Value> {
        debug!(?command, "GUI control");
        let gui = self.client.gui();

        let result = match command {
            GuiCommand::CurrentCard => gui.current_card().await,
            GuiCommand::ShowAnswer => gui.show_answer().await,
            GuiCommand::Answer(ease) => {
                gui.show_answer().await.context("Error showing answer")?;
                let result = gui.answer_card(ease.grade()).await;
                if result.is_ok() {
                    info!(?ease, "Card answered");
                }
                result
            }
            GuiCommand::Undo => gui.undo().await,
        };
        result.context("Error in GUI control")
    }

    /// Snapshot the current review session.
    pub async fn current_session(&self) -> Result<SessionSnapshot> {
        let current_card = self
            .client
            .gui()
            .current_card()
            .await
            .context("Error getting current card")?;
        Ok(SessionSnapshot {
            current_card,
            timestamp: Utc::now().timestamp(),
        })
    }
}

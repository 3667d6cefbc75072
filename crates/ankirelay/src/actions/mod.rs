//! AnkiConnect action groups.
//!
//! Each group borrows the client and exposes one method per action. Every
//! method returns the action's raw JSON result.

mod cards;
mod decks;
mod graphical;
mod miscellaneous;
mod models;
mod notes;
mod statistics;

pub use cards::CardActions;
pub use decks::DeckActions;
pub use graphical::GuiActions;
pub use miscellaneous::MiscActions;
pub use models::ModelActions;
pub use notes::NoteActions;
pub use statistics::StatisticsActions;

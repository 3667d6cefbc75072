//! Note creation, update, deletion and lookup.
//!
//! Note payloads stay as JSON objects so that any key AnkiConnect accepts
//! (`options`, `audio`, `picture`, ...) reaches it unchanged. Only the keys
//! the handlers depend on are checked.

use ankirelay::AnkiClient;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{ClientContext, Error, Result};
use crate::ids::{RawId, coerce_ids, parse_path_ids, path_ids};
use crate::response;

/// A note payload as sent to AnkiConnect.
pub type NoteSpec = Map<String, Value>;

const REQUIRED_NOTE_KEYS: [&str; 2] = ["deckName", "modelName"];

/// Note workflow engine.
#[derive(Debug)]
pub struct NoteEngine<'a> {
    client: &'a AnkiClient,
}

impl<'a> NoteEngine<'a> {
    pub(crate) fn new(client: &'a AnkiClient) -> Self {
        Self { client }
    }

    /// Create notes in one `addNotes` call.
    ///
    /// Each note needs a non-empty `deckName` and `modelName` and a `fields`
    /// object. Returns AnkiConnect's result: one entry per note, either the
    /// new note ID or `null` where that note could not be added.
    pub async fn create(&self, notes: &[NoteSpec]) -> Result<Value> {
        if notes.is_empty() {
            return Err(Error::validation("at least one note is required"));
        }
        for (index, note) in notes.iter().enumerate() {
            validate_new_note(index, note)?;
        }

        debug!(count = notes.len(), "Creating notes");
        let result = self
            .client
            .notes()
            .add_many(notes)
            .await
            .context("Error creating notes")?;
        info!(count = notes.len(), "Notes created");
        Ok(result)
    }

    /// Update a note's fields and/or tags.
    ///
    /// The note's `id` may be an integer, float or decimal string; it is sent
    /// to AnkiConnect as an integer. At least one of `fields` or `tags` must
    /// be present. Returns the canonical note ID.
    pub async fn update(&self, note: &NoteSpec) -> Result<i64> {
        let id = note
            .get("id")
            .cloned()
            .and_then(|raw| serde_json::from_value::<RawId>(raw).ok())
            .and_then(|raw| raw.canonical())
            .ok_or_else(|| Error::validation("note 'id' is missing or not a valid note ID"))?;

        if !note.contains_key("fields") && !note.contains_key("tags") {
            return Err(Error::validation(
                "note must include 'fields' and/or 'tags' to update",
            ));
        }

        let mut payload = note.clone();
        payload.insert("id".to_string(), Value::from(id));

        debug!(note_id = id, "Updating note");
        self.client
            .notes()
            .update(&payload)
            .await
            .context("Error updating note")?;
        info!(note_id = id, "Note updated");
        Ok(id)
    }

    /// Delete notes and their cards.
    ///
    /// IDs that do not parse are dropped. Returns the IDs that were sent.
    pub async fn delete(&self, note_ids: &[RawId]) -> Result<Vec<i64>> {
        let ids = coerce_ids(note_ids);
        debug!(requested = note_ids.len(), coerced = ids.len(), "Deleting notes");

        self.client
            .notes()
            .delete(&ids)
            .await
            .context("Error deleting notes")?;
        info!(count = ids.len(), "Notes deleted");
        Ok(ids)
    }

    /// Look up notes named by a comma-separated path segment.
    ///
    /// With one ID the single record is returned, or [`Error::NotFound`].
    /// With several the list is returned as-is.
    pub async fn info(&self, segment: &str) -> Result<Value> {
        if parse_path_ids(segment).is_empty() {
            return Err(Error::validation("no note IDs provided"));
        }
        let ids = path_ids(segment);

        let result = self
            .client
            .notes()
            .info(&ids)
            .await
            .context("Error getting notes info")?;
        response::collapse(response::list(result, "notesInfo")?, &ids, "note")
    }
}

fn validate_new_note(index: usize, note: &NoteSpec) -> Result<()> {
    for key in REQUIRED_NOTE_KEYS {
        match note.get(key) {
            Some(Value::String(s)) if !s.is_empty() => {}
            _ => {
                return Err(Error::validation(format!(
                    "note {}: '{}' must be a non-empty string",
                    index, key
                )));
            }
        }
    }
    if !matches!(note.get("fields"), Some(Value::Object(_))) {
        return Err(Error::validation(format!(
            "note {}: 'fields' must be an object",
            index
        )));
    }
    Ok(())
}

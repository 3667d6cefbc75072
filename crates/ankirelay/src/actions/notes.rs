//! Note and tag AnkiConnect actions.
//!
//! Note payloads are forwarded as-is, so any field AnkiConnect understands
//! (`options`, `audio`, `picture`, ...) reaches it untouched.

use serde::Serialize;
use serde_json::Value;

use crate::client::AnkiClient;
use crate::error::Result;

/// Provides access to note-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::notes()`].
#[derive(Debug)]
pub struct NoteActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
struct FindNotesParams<'a> {
    query: &'a str,
}

#[derive(Serialize)]
struct NotesParams<'a> {
    notes: &'a [i64],
}

#[derive(Serialize)]
struct AddNotesParams<'a, N> {
    notes: &'a [N],
}

#[derive(Serialize)]
struct UpdateNoteParams<'a, N> {
    note: &'a N,
}

#[derive(Serialize)]
struct TagsParams<'a> {
    notes: &'a [i64],
    tags: &'a str,
}

#[derive(Serialize)]
struct ReplaceTagsParams<'a> {
    notes: &'a [i64],
    tag_to_replace: &'a str,
    replace_with_tag: &'a str,
}

impl<'a> NoteActions<'a> {
    /// Find notes matching a query. AnkiConnect answers with note IDs.
    pub async fn find(&self, query: &str) -> Result<Value> {
        self.client
            .call("findNotes", FindNotesParams { query })
            .await
    }

    /// Get detailed information about notes.
    pub async fn info(&self, note_ids: &[i64]) -> Result<Value> {
        self.client
            .call("notesInfo", NotesParams { notes: note_ids })
            .await
    }

    /// Add several notes at once.
    ///
    /// AnkiConnect answers with one entry per note: the new ID, or `null`
    /// where the note could not be added.
    pub async fn add_many<N>(&self, notes: &[N]) -> Result<Value>
    where
        N: Serialize,
    {
        self.client.call("addNotes", AddNotesParams { notes }).await
    }

    /// Update a note's fields and/or tags. `note` must carry its `id`.
    pub async fn update<N>(&self, note: &N) -> Result<Value>
    where
        N: Serialize,
    {
        self.client
            .call("updateNote", UpdateNoteParams { note })
            .await
    }

    /// Delete notes and all cards generated from them.
    pub async fn delete(&self, note_ids: &[i64]) -> Result<Value> {
        self.client
            .call("deleteNotes", NotesParams { notes: note_ids })
            .await
    }

    /// Add space-separated tags to notes.
    pub async fn add_tags(&self, note_ids: &[i64], tags: &str) -> Result<Value> {
        self.client
            .call(
                "addTags",
                TagsParams {
                    notes: note_ids,
                    tags,
                },
            )
            .await
    }

    /// Remove space-separated tags from notes.
    pub async fn remove_tags(&self, note_ids: &[i64], tags: &str) -> Result<Value> {
        self.client
            .call(
                "removeTags",
                TagsParams {
                    notes: note_ids,
                    tags,
                },
            )
            .await
    }

    /// Replace one tag with another on the given notes.
    pub async fn replace_tags(
        &self,
        note_ids: &[i64],
        tag_to_replace: &str,
        replace_with_tag: &str,
    ) -> Result<Value> {
        self.client
            .call(
                "replaceTags",
                ReplaceTagsParams {
                    notes: note_ids,
                    tag_to_replace,
                    replace_with_tag,
                },
            )
            .await
    }

    /// List every tag in the collection.
    pub async fn tags(&self) -> Result<Value> {
        self.client.call_without_params("getTags").await
    }
}

//! Tag management.

use std::str::FromStr;

use ankirelay::AnkiClient;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ClientContext, Error, Result};
use crate::ids::{RawId, coerce_ids};
use crate::response;

/// Tag action selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAction {
    /// Add tags.
    Add,
    /// Remove tags.
    Delete,
    /// Replace one tag with another.
    Replace,
}

impl FromStr for TagAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "add" => Ok(TagAction::Add),
            "delete" => Ok(TagAction::Delete),
            "replace" => Ok(TagAction::Replace),
            _ => Err(Error::validation(format!(
                "Invalid action: {}. Must be 'add', 'delete', or 'replace'",
                s
            ))),
        }
    }
}

/// A validated tag operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOperation {
    /// Add space-separated tags.
    Add(String),
    /// Remove space-separated tags.
    Delete(String),
    /// Replace one tag with another.
    Replace {
        /// Tag to replace.
        old: String,
        /// Replacement tag.
        new: String,
    },
}

impl TagOperation {
    /// Build an operation from a selector and its optional arguments.
    ///
    /// `add` and `delete` need `tags`; `replace` needs both
    /// `tag_to_replace` and `replace_with_tag`.
    pub fn from_request(
        action: TagAction,
        tags: Option<&str>,
        tag_to_replace: Option<&str>,
        replace_with_tag: Option<&str>,
    ) -> Result<Self> {
        match action {
            TagAction::Add | TagAction::Delete => {
                let tags = present(tags)
                    .ok_or_else(|| {
                        Error::validation("tags parameter required for add and delete actions")
                    })?
                    .to_string();
                Ok(if action == TagAction::Add {
                    TagOperation::Add(tags)
                } else {
                    TagOperation::Delete(tags)
                })
            }
            TagAction::Replace => match (present(tag_to_replace), present(replace_with_tag)) {
                (Some(old), Some(new)) => Ok(TagOperation::Replace {
                    old: old.to_string(),
                    new: new.to_string(),
                }),
                _ => Err(Error::validation(
                    "tag_to_replace and replace_with_tag parameters required for replace action",
                )),
            },
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Tag workflow engine.
#[derive(Debug)]
pub struct TagEngine<'a> {
    client: &'a AnkiClient,
}

impl<'a> TagEngine<'a> {
    pub(crate) fn new(client: &'a AnkiClient) -> Self {
        Self { client }
    }

    /// Apply a tag operation to notes.
    ///
    /// IDs that do not parse are dropped. Returns the number of IDs sent.
    pub async fn manage(&self, note_ids: &[RawId], operation: &TagOperation) -> Result<usize> {
        let ids = coerce_ids(note_ids);
        debug!(count = ids.len(), ?operation, "Managing tags");

        let notes = self.client.notes();
        let result = match operation {
            TagOperation::Add(tags) => notes.add_tags(&ids, tags).await,
            TagOperation::Delete(tags) => notes.remove_tags(&ids, tags).await,
            TagOperation::Replace { old, new } => notes.replace_tags(&ids, old, new).await,
        };
        result.context("Error managing tags")?;

        info!(count = ids.len(), "Tags updated");
        Ok(ids.len())
    }

    /// List every tag in the collection.
    pub async fn list(&self) -> Result<Vec<Value>> {
        let tags = self.client.notes().tags().await.context("Error listing tags")?;
        response::list(tags, "getTags")
    }
}

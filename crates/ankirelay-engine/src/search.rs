//! Paginated card and note search.

use std::fmt;
use std::str::FromStr;

use ankirelay::AnkiClient;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientContext, Error, Result};
use crate::ids::narrow_ids;
use crate::paginate::{self, Page};
use crate::response;

/// Number of records returned per search page.
pub const SEARCH_PAGE_SIZE: usize = 100;

/// What a search returns records for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Search cards; items are `cardsInfo` records.
    Cards,
    /// Search notes; items are `notesInfo` records.
    Notes,
}

impl FromStr for SearchMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cards" => Ok(SearchMode::Cards),
            "notes" => Ok(SearchMode::Notes),
            _ => Err(Error::validation(format!(
                "Invalid search type: {}. Must be 'cards' or 'notes'",
                s
            ))),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Cards => f.write_str("cards"),
            SearchMode::Notes => f.write_str("notes"),
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    /// The mode that was searched.
    pub mode: SearchMode,
    /// The query as given.
    pub query: String,
    /// Number of IDs the query matched, across all pages.
    pub total_found: usize,
    /// Info records for this page.
    pub items: Vec<Value>,
    /// Cursor for the next page. Absent on the last page.
    #[serde(rename = "nextCursor", skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Search workflow engine.
#[derive(Debug)]
pub struct SearchEngine<'a> {
    client: &'a AnkiClient,
}

impl<'a> SearchEngine<'a> {
    pub(crate) fn new(client: &'a AnkiClient) -> Self {
        Self { client }
    }

    /// Run a query and return the page that `cursor` points at.
    ///
    /// The cursor is decoded before AnkiConnect is contacted, so a bad cursor
    /// costs no backend calls. When the query matches nothing the info
    /// lookup is skipped.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ankirelay_engine::{Engine, search::SearchMode};
    ///
    /// # async fn example() -> ankirelay_engine::Result<()> {
    /// let engine = Engine::new()?;
    /// let mut cursor = None;
    /// loop {
    ///     let page = engine.search().run("tag:verb", SearchMode::Notes, cursor.as_deref()).await?;
    ///     println!("{} notes on this page", page.items.len());
    ///     match page.next_cursor {
    ///         Some(next) => cursor = Some(next),
    ///         None => break,
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run(
        &self,
        query: &str,
        mode: SearchMode,
        cursor: Option<&str>,
    ) -> Result<SearchResults> {
        let start = paginate::start_offset(cursor)?;
        debug!(query, %mode, start, "Searching");

        let (ids, records) = match mode {
            SearchMode::Cards => {
                let found = self.client.cards().find(query).await.context("Error finding cards")?;
                let ids = narrow_ids(found, "findCards")?;
                let records = if ids.is_empty() {
                    Vec::new()
                } else {
                    let info = self
                        .client
                        .cards()
                        .info(&ids)
                        .await
                        .context("Error getting cards info")?;
                    response::list(info, "cardsInfo")?
                };
                (ids, records)
            }
            SearchMode::Notes => {
                let found = self.client.notes().find(query).await.context("Error finding notes")?;
                let ids = narrow_ids(found, "findNotes")?;
                let records = if ids.is_empty() {
                    Vec::new()
                } else {
                    let info = self
                        .client
                        .notes()
                        .info(&ids)
                        .await
                        .context("Error getting notes info")?;
                    response::list(info, "notesInfo")?
                };
                (ids, records)
            }
        };

        let Page { items, next_cursor } =
            paginate::page_from(records, start, SEARCH_PAGE_SIZE);
        debug!(total = ids.len(), returned = items.len(), "Search complete");

        Ok(SearchResults {
            mode,
            query: query.to_string(),
            total_found: ids.len(),
            items,
            next_cursor,
        })
    }
}

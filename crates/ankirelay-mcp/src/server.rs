//! MCP server implementation: tools, resources and read-only mode.

use std::sync::Arc;

use ankirelay_engine::cards::{CardStateAction, CardStateChange};
use ankirelay_engine::gui::{GuiAction, GuiCommand};
use ankirelay_engine::ids::RawId;
use ankirelay_engine::search::SearchMode;
use ankirelay_engine::tags::{TagAction, TagOperation};
use ankirelay_engine::{AnkiClient, Engine, Error as EngineError};
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::resources::{self, JSON_MIME, ResourceRoute};

// ============================================================================
// Tool Parameters
// ============================================================================

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchParams {
    /// Anki search query (e.g. "deck:Japanese tag:verb is:due")
    pub query: String,
    /// What to return records for: "cards" or "notes"
    #[serde(alias = "search_type")]
    pub mode: String,
    /// Cursor from a previous page's nextCursor; omit for the first page
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CreateNotesParams {
    /// Notes to create. Each needs deckName, modelName and a fields object;
    /// tags, options, audio, picture and other AnkiConnect keys are passed through
    pub notes: Vec<Map<String, Value>>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct UpdateNoteParams {
    /// Note with its id and the fields and/or tags to set
    pub note: Map<String, Value>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ManageTagsParams {
    /// "add", "delete" or "replace"
    pub action: String,
    /// Note IDs (numbers or numeric strings)
    pub note_ids: Vec<RawId>,
    /// Space-separated tags (add and delete)
    #[serde(default)]
    pub tags: Option<String>,
    /// Tag to replace (replace)
    #[serde(default)]
    pub tag_to_replace: Option<String>,
    /// Replacement tag (replace)
    #[serde(default)]
    pub replace_with_tag: Option<String>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ChangeCardStateParams {
    /// "suspend", "unsuspend", "forget", "relearn", "set_due" or "set_ease"
    pub action: String,
    /// Card IDs (numbers or numeric strings)
    pub card_ids: Vec<RawId>,
    /// Due date for set_due: "0" today, "1!" tomorrow and reset interval, "3-7" a random range
    #[serde(default)]
    pub days: Option<String>,
    /// Ease factors for set_ease, one per card (2500 = 250%)
    #[serde(default)]
    pub ease_factors: Option<Vec<i64>>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GuiControlParams {
    /// "current_card", "show_answer", "answer" or "undo"
    pub action: String,
    /// Grade for answer: 1 (Again), 2 (Hard), 3 (Good) or 4 (Easy)
    #[serde(default)]
    pub ease: Option<i64>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct DeleteNotesParams {
    /// Note IDs (numbers or numeric strings)
    pub note_ids: Vec<RawId>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct UpdateDeckConfigParams {
    /// Options group as returned by the deck config resource, including its id
    pub config: Map<String, Value>,
}

// ============================================================================
// Result Helpers
// ============================================================================

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value).map_err(|e| McpError::internal_error(e.to_string(), None))
}

/// Render an engine result as a tool result. Failures become error results.
fn tool_result<T: Serialize>(
    tool: &str,
    result: ankirelay_engine::Result<T>,
) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => Ok(CallToolResult::success(vec![Content::text(to_json(&value)?)])),
        Err(e) => Ok(tool_error(tool, e)),
    }
}

/// Like [`tool_result`], but reports a fixed message on success.
fn tool_message<T>(
    tool: &str,
    result: ankirelay_engine::Result<T>,
    message: &str,
) -> Result<CallToolResult, McpError> {
    match result {
        Ok(_) => Ok(CallToolResult::success(vec![Content::text(message)])),
        Err(e) => Ok(tool_error(tool, e)),
    }
}

fn tool_error(tool: &str, error: EngineError) -> CallToolResult {
    warn!(tool, error = %error, "Tool call failed");
    CallToolResult::error(vec![Content::text(error.to_string())])
}

fn resource_error(uri: &str, error: EngineError) -> McpError {
    warn!(uri, error = %error, "Resource read failed");
    match error {
        EngineError::Validation(_) => McpError::invalid_params(error.to_string(), None),
        EngineError::NotFound(_) => McpError::resource_not_found(error.to_string(), None),
        _ => McpError::internal_error(error.to_string(), None),
    }
}

fn render<T: Serialize>(uri: &str, result: ankirelay_engine::Result<T>) -> Result<String, McpError> {
    to_json(&result.map_err(|e| resource_error(uri, e))?)
}

// ============================================================================
// Server Implementation
// ============================================================================

#[derive(Clone)]
pub struct AnkiServer {
    engine: Arc<Engine>,
    tool_router: ToolRouter<AnkiServer>,
    read_only: bool,
}

impl AnkiServer {
    pub fn new(client: AnkiClient, read_only: bool) -> Self {
        Self {
            engine: Arc::new(Engine::from_client(client)),
            tool_router: Self::tool_router(),
            read_only,
        }
    }

    /// Check that AnkiConnect answers. Never fails; only logs.
    pub async fn probe(&self) {
        match self.engine.client().misc().version().await {
            Ok(version) => info!(%version, url = self.engine.client().url(), "Connected to AnkiConnect"),
            Err(e) => warn!(
                error = %e,
                url = self.engine.client().url(),
                "AnkiConnect is not reachable; calls will fail until Anki is running"
            ),
        }
    }

    /// An engine whose calls stop when the request is cancelled.
    fn scoped(&self, context: &RequestContext<RoleServer>) -> Engine {
        self.engine.with_cancellation(context.ct.clone())
    }

    /// In read-only mode, the error result a write tool returns instead of running.
    fn check_write(&self, operation: &str) -> Option<CallToolResult> {
        if !self.read_only {
            return None;
        }
        let error = EngineError::Validation(format!(
            "Write operation '{}' is not allowed in read-only mode",
            operation
        ));
        Some(tool_error(operation, error))
    }
}

#[tool_router]
impl AnkiServer {
    #[tool(
        description = "Search cards or notes with Anki query syntax. Returns 100 info records per page; pass nextCursor back as cursor for the next page."
    )]
    async fn search(
        &self,
        Parameters(params): Parameters<SearchParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        debug!(query = %params.query, mode = %params.mode, "Search");
        let engine = self.scoped(&context);

        let result = async {
            let mode: SearchMode = params.mode.parse()?;
            engine
                .search()
                .run(&params.query, mode, params.cursor.as_deref())
                .await
        }
        .await;
        tool_result("search", result)
    }

    #[tool(
        description = "Create one or more notes. Returns one entry per note: the new note ID, or null if it could not be added."
    )]
    async fn create_notes(
        &self,
        Parameters(params): Parameters<CreateNotesParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        if let Some(blocked) = self.check_write("create_notes") {
            return Ok(blocked);
        }
        let engine = self.scoped(&context);
        tool_result("create_notes", engine.notes().create(&params.notes).await)
    }

    #[tool(description = "Update a note's fields and/or tags. The note must include its id.")]
    async fn update_note(
        &self,
        Parameters(params): Parameters<UpdateNoteParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        if let Some(blocked) = self.check_write("update_note") {
            return Ok(blocked);
        }
        let engine = self.scoped(&context);
        tool_message(
            "update_note",
            engine.notes().update(&params.note).await,
            "Note updated successfully",
        )
    }

    #[tool(
        description = "Add, delete or replace tags on notes. add/delete take space-separated tags; replace takes tag_to_replace and replace_with_tag."
    )]
    async fn manage_tags(
        &self,
        Parameters(params): Parameters<ManageTagsParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        if let Some(blocked) = self.check_write("manage_tags") {
            return Ok(blocked);
        }
        let engine = self.scoped(&context);

        let result = async {
            let action: TagAction = params.action.parse()?;
            let operation = TagOperation::from_request(
                action,
                params.tags.as_deref(),
                params.tag_to_replace.as_deref(),
                params.replace_with_tag.as_deref(),
            )?;
            engine.tags().manage(&params.note_ids, &operation).await
        }
        .await;
        tool_message("manage_tags", result, "Tags managed successfully")
    }

    #[tool(
        description = "Change card state: suspend, unsuspend, forget (reset to new), relearn, set_due (needs days) or set_ease (needs one ease factor per card)."
    )]
    async fn change_card_state(
        &self,
        Parameters(params): Parameters<ChangeCardStateParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        if let Some(blocked) = self.check_write("change_card_state") {
            return Ok(blocked);
        }
        let engine = self.scoped(&context);

        let result = async {
            let action: CardStateAction = params.action.parse()?;
            let change = CardStateChange::from_request(
                action,
                params.days.as_deref(),
                params.ease_factors.as_deref(),
            )?;
            engine.cards().change_state(&params.card_ids, &change).await
        }
        .await;
        tool_result("change_card_state", result)
    }

    #[tool(
        description = "Control the Anki reviewer: current_card, show_answer, answer (needs ease 1-4) or undo. Requires the Anki window to be open."
    )]
    async fn gui_control(
        &self,
        Parameters(params): Parameters<GuiControlParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let command = params
            .action
            .parse::<GuiAction>()
            .and_then(|action| GuiCommand::from_request(action, params.ease));
        let command = match command {
            Ok(command) => command,
            Err(e) => return Ok(tool_error("gui_control", e)),
        };
        if command.is_mutation() {
            if let Some(blocked) = self.check_write("gui_control") {
                return Ok(blocked);
            }
        }

        let engine = self.scoped(&context);
        tool_result("gui_control", engine.gui().run(command).await)
    }

    #[tool(description = "Delete notes and all of their cards.")]
    async fn delete_notes(
        &self,
        Parameters(params): Parameters<DeleteNotesParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        if let Some(blocked) = self.check_write("delete_notes") {
            return Ok(blocked);
        }
        let engine = self.scoped(&context);
        tool_message(
            "delete_notes",
            engine.notes().delete(&params.note_ids).await,
            "Notes deleted successfully",
        )
    }

    #[tool(description = "Save a deck options group. Read it first from the deck config resource.")]
    async fn update_deck_config(
        &self,
        Parameters(params): Parameters<UpdateDeckConfigParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        if let Some(blocked) = self.check_write("update_deck_config") {
            return Ok(blocked);
        }
        let engine = self.scoped(&context);
        tool_result(
            "update_deck_config",
            engine.decks().update_config(&params.config).await,
        )
    }
}

#[tool_handler]
impl ServerHandler for AnkiServer {
    fn get_info(&self) -> ServerInfo {
        let mode = if self.read_only { " (read-only)" } else { "" };
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(format!(
                "Anki collection access via AnkiConnect{}. \
                 Requires Anki to be running with the AnkiConnect add-on installed. \
                 Tools: search, create_notes, update_note, manage_tags, change_card_state, \
                 gui_control, delete_notes, update_deck_config. \
                 Resources live under collection:// (decks, models, tags, cards/{{ids}}/info, ...).",
                mode
            )),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: resources::resources(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        let resource_templates = resources::resource_templates()
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(ListResourceTemplatesResult {
            resource_templates,
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let uri = request.uri.as_str();
        let route = ResourceRoute::parse(uri).ok_or_else(|| {
            McpError::resource_not_found(format!("Unknown resource: {}", uri), None)
        })?;
        debug!(uri, ?route, "Reading resource");

        let engine = self.scoped(&context);
        let body = match route {
            ResourceRoute::Decks => render(uri, engine.decks().list().await)?,
            ResourceRoute::DeckConfig(deck) => render(uri, engine.decks().config(&deck).await)?,
            ResourceRoute::DeckStats(deck) => render(uri, engine.decks().stats(&deck).await)?,
            ResourceRoute::Models => render(uri, engine.models().list().await)?,
            ResourceRoute::Model(name) => {
                render(uri, engine.models().fields_on_templates(&name).await)?
            }
            ResourceRoute::CardsInfo(ids) => render(uri, engine.cards().info(&ids).await)?,
            ResourceRoute::NotesInfo(ids) => render(uri, engine.notes().info(&ids).await)?,
            ResourceRoute::CardReviews(ids) => render(uri, engine.cards().reviews(&ids).await)?,
            ResourceRoute::Tags => render(uri, engine.tags().list().await)?,
            ResourceRoute::CurrentSession => render(uri, engine.gui().current_session().await)?,
            ResourceRoute::CollectionStats => render(uri, engine.stats().collection().await)?,
            ResourceRoute::DailyStats => render(uri, engine.stats().daily().await)?,
        };

        let mut contents = ResourceContents::text(body, uri);
        if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents {
            *mime_type = Some(JSON_MIME.to_string());
        }
        Ok(ReadResourceResult {
            contents: vec![contents],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_invalid_params() {
        let err = resource_error(
            "collection://cards//info",
            EngineError::Validation("no card IDs provided".into()),
        );
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(err.message, "no card IDs provided");
    }

    #[test]
    fn test_not_found_maps_to_resource_not_found() {
        let err = resource_error(
            "collection://cards/1/info",
            EngineError::NotFound("card 1 not found".into()),
        );
        assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
    }

    #[test]
    fn test_other_errors_are_internal() {
        let err = resource_error(
            "collection://decks",
            EngineError::InvalidCursor("bad".into()),
        );
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    }

    #[test]
    fn test_tool_error_is_flagged() {
        let result = tool_error("search", EngineError::Validation("bad mode".into()));
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_tool_message_on_success() {
        let result = tool_message("delete_notes", Ok(vec![1_i64]), "Notes deleted successfully")
            .unwrap();
        assert_eq!(result.is_error, Some(false));
    }

    #[test]
    fn test_search_params_accept_legacy_name() {
        let params: SearchParams =
            serde_json::from_value(serde_json::json!({"query": "q", "search_type": "notes"}))
                .unwrap();
        assert_eq!(params.mode, "notes");
        assert!(params.cursor.is_none());
    }

    #[test]
    fn test_read_only_blocks_writes_with_error_result() {
        let client = AnkiClient::builder().build().unwrap();
        let server = AnkiServer::new(client, true);
        let blocked = server.check_write("delete_notes").unwrap();
        assert_eq!(blocked.is_error, Some(true));

        let body = serde_json::to_value(&blocked).unwrap();
        assert_eq!(
            body["content"][0]["text"],
            "Write operation 'delete_notes' is not allowed in read-only mode"
        );
    }

    #[test]
    fn test_writes_allowed_when_not_read_only() {
        let client = AnkiClient::builder().build().unwrap();
        let server = AnkiServer::new(client, false);
        assert!(server.check_write("delete_notes").is_none());
    }
}

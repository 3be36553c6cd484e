//! MCP tool handlers for the launcher search server.
//!
//! Each tool delegates to the [`LauncherService`] and renders its response as
//! pretty-printed JSON.

use crate::error::SearchError;
use crate::preferences::TagState;
use crate::services::LauncherService;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server exposing launcher search as tools.
#[derive(Clone)]
pub struct LauncherMcpServer {
    service: Arc<dyn LauncherService>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for LauncherMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "launcher-search".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Launcher search engine - ranks applications, contacts, settings and shortcuts against partial queries, with highlight markers in display names.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct SearchParams {
    #[serde(default)]
    query: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ListItemsParams {
    #[serde(default)]
    provider: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ItemIdParams {
    id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct RecordSelectionParams {
    query: String,
    id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct TagStateParams {
    tag: String,
    state: TagState,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct MaxResultCountParams {
    value: String,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn search_error_to_mcp(e: SearchError) -> McpError {
    match e {
        SearchError::InvalidQuery(_) | SearchError::NotFound(_) => McpError {
            code: ErrorCode::INVALID_PARAMS,
            message: Cow::from(e.to_string()),
            data: None,
        },
        other => to_mcp_error(other),
    }
}

fn json_result(value: &impl serde::Serialize) -> Result<CallToolResult, McpError> {
    let json_response = serde_json::to_string_pretty(value).map_err(to_mcp_error)?;
    Ok(CallToolResult::success(vec![Content::text(json_response)]))
}

#[tool_router]
impl LauncherMcpServer {
    /// Create a new launcher MCP server.
    pub fn new(service: Arc<dyn LauncherService>) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    /// Rank launcher items against a partial query.
    #[tool(
        description = "Rank applications, contacts, settings and shortcuts against a partial query. Returns the best matches in descending relevance; highlighted regions of display_name are wrapped in { }."
    )]
    async fn search_launcher(
        &self,
        params: Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        tracing::debug!(query = ?params.query, "MCP Handler: search_launcher called");

        match self.service.search(params.query.clone()).await {
            Ok(response) => json_result(&response),
            // A newer query replaced this one; its results are discarded.
            Err(SearchError::Cancelled) => json_result(&serde_json::json!({
                "query": params.query,
                "superseded": true,
                "results": [],
            })),
            Err(e) => Err(search_error_to_mcp(e)),
        }
    }

    /// List every item, ordered by name.
    #[tool(
        description = "List every launcher item (optionally for one provider: applications, contacts, settings, shortcuts) ordered by name, honoring the tag filter"
    )]
    async fn list_items(
        &self,
        params: Parameters<ListItemsParams>,
    ) -> Result<CallToolResult, McpError> {
        let items = self
            .service
            .list_items(params.0.provider)
            .await
            .map_err(search_error_to_mcp)?;

        json_result(&serde_json::json!({
            "count": items.len(),
            "items": items,
        }))
    }

    /// Retrieve a single item by id.
    #[tool(description = "Retrieve a single launcher item by id, e.g. app://org.calendar")]
    async fn get_item(&self, params: Parameters<ItemIdParams>) -> Result<CallToolResult, McpError> {
        let item = self
            .service
            .get_item(&params.0.id)
            .await
            .map_err(search_error_to_mcp)?;

        json_result(&item)
    }

    /// Record that an item was launched for a query.
    #[tool(
        description = "Record that the user launched an item after typing a query; future searches for the same query rank it higher"
    )]
    async fn record_selection(
        &self,
        params: Parameters<RecordSelectionParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        tracing::info!(query = %params.query, id = %params.id, "MCP Handler: record_selection called");

        self.service
            .record_selection(&params.query, &params.id)
            .await
            .map_err(search_error_to_mcp)?;

        json_result(&serde_json::json!({
            "query": params.query,
            "id": params.id,
            "recorded": true,
        }))
    }

    /// Hide, require, or reset a tag.
    #[tool(
        description = "Set a togglable tag to default, hide (exclude tagged items) or show (require the tag)"
    )]
    async fn set_tag_state(
        &self,
        params: Parameters<TagStateParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let response = self
            .service
            .set_tag_state(&params.tag, params.state)
            .await
            .map_err(search_error_to_mcp)?;

        json_result(&response)
    }

    /// Change the maximum number of results.
    #[tool(
        description = "Set the maximum number of search results. Out-of-range values are clamped to 1-1000 and unparsable values fall back to 5."
    )]
    async fn set_max_result_count(
        &self,
        params: Parameters<MaxResultCountParams>,
    ) -> Result<CallToolResult, McpError> {
        let value = self
            .service
            .set_max_result_count(&params.0.value)
            .await
            .map_err(search_error_to_mcp)?;

        json_result(&serde_json::json!({ "max_result_count": value }))
    }

    /// Reload every catalog.
    #[tool(description = "Reload every provider's catalog from its source")]
    async fn reload_catalog(&self) -> Result<CallToolResult, McpError> {
        let total = self
            .service
            .reload_catalogs()
            .await
            .map_err(search_error_to_mcp)?;

        json_result(&serde_json::json!({ "item_count": total }))
    }

    /// Report search counters.
    #[tool(description = "Report query, supersession and provider pass counters")]
    async fn get_metrics(&self) -> Result<CallToolResult, McpError> {
        let metrics = self.service.metrics();
        json_result(&serde_json::json!({
            "queries_total": metrics.queries_total(),
            "superseded_total": metrics.superseded_total(),
            "provider_passes_total": metrics.provider_passes_total(),
            "provider_failures_total": metrics.provider_failures_total(),
            "results_total": metrics.results_total(),
        }))
    }
}

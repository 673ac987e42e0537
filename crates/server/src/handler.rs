//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.

use std::sync::Arc;

use crate::tools::{
    CachedAnswerParams, ClearHistoryParams, DatasetSearchParams, RecentSearchesParams, SharedHistory, cached_impl,
    clear_impl, recent_impl, search_impl,
};
use govq_client::AskClient;
use govq_core::{AppConfig, SearchHistoryStore};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use tokio::sync::Mutex;

/// The main MCP server handler for govq.
///
/// Owns the one search history for the process; every tool call goes
/// through it.
#[derive(Clone)]
pub struct GovqServer {
    tool_router: ToolRouter<Self>,
    history: SharedHistory,
    client: AskClient,
    config: Arc<AppConfig>,
}

/// Dataset search tools over the shared search history.
#[tool_router]
impl GovqServer {
    /// Create a new server handler around an already loaded history.
    pub fn new(history: SearchHistoryStore, client: AskClient, config: AppConfig) -> Self {
        Self {
            tool_router: Self::tool_router(),
            history: Arc::new(Mutex::new(history)),
            client,
            config: Arc::new(config),
        }
    }

    /// Answer a question about government data.
    ///
    /// Repeated questions are answered from history unless `force_refresh` is set.
    #[tool(description = "Ask a natural-language question about government data. Returns a prose answer and \
                          matching datasets (agency, title, topics, URLs, quality score).")]
    async fn dataset_search(&self, params: Parameters<DatasetSearchParams>) -> Result<CallToolResult, McpError> {
        search_impl(&self.history, &self.client, &self.config, params.0).await
    }

    #[tool(description = "List recent questions, most recent first, and whether each has a cached answer.")]
    async fn recent_searches(&self, params: Parameters<RecentSearchesParams>) -> Result<CallToolResult, McpError> {
        recent_impl(&self.history, params.0).await
    }

    #[tool(description = "Show the cached answer for a previously asked question without querying again.")]
    async fn cached_answer(&self, params: Parameters<CachedAnswerParams>) -> Result<CallToolResult, McpError> {
        cached_impl(&self.history, params.0).await
    }

    #[tool(description = "Clear all recent questions and cached answers.")]
    async fn clear_history(&self, params: Parameters<ClearHistoryParams>) -> Result<CallToolResult, McpError> {
        clear_impl(&self.history, params.0).await
    }
}

impl ServerHandler for GovqServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "govq".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::offline_client;
    use govq_core::MemoryStorage;

    async fn server() -> GovqServer {
        GovqServer::new(SearchHistoryStore::load(MemoryStorage::new()), offline_client().await, AppConfig::default())
    }

    #[tokio::test]
    async fn test_lists_all_tools() {
        let server = server().await;
        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();
        assert_eq!(names, ["cached_answer", "clear_history", "dataset_search", "recent_searches"]);
    }

    #[tokio::test]
    async fn test_server_info() {
        let info = server().await.get_info();
        assert_eq!(info.server_info.name, "govq");
        assert!(info.capabilities.tools.is_some());
    }

    #[tokio::test]
    async fn test_search_then_recent_share_history() {
        let server = server().await;
        let params = DatasetSearchParams { question: "median house price".into(), ..Default::default() };
        server.dataset_search(Parameters(params)).await.unwrap();

        let history = server.history.lock().await;
        assert_eq!(history.recent(), ["median house price"]);
        assert!(history.get_cached_answer("median house price").is_some());
    }
}

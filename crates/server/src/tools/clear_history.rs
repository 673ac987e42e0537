//! clear_history tool implementation.
//!
//! Forgets all recent questions and cached answers.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{SharedHistory, json_result};

/// Parameters for the clear_history tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ClearHistoryParams {}

/// Output from the clear_history tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClearHistoryOutput {
    /// Number of questions removed.
    pub cleared: usize,
}

/// Implementation of the clear_history tool.
pub async fn clear_impl(history: &SharedHistory, _params: ClearHistoryParams) -> Result<CallToolResult, McpError> {
    let mut history = history.lock().await;
    let cleared = history.len();
    history.clear_all();
    tracing::info!(cleared, "search history cleared");

    json_result(&ClearHistoryOutput { cleared })
}

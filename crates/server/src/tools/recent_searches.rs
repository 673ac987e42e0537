//! recent_searches tool implementation.
//!
//! Lists recent questions, most recent first.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{SharedHistory, json_result};

/// Parameters for the recent_searches tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RecentSearchesParams {
    /// Return at most this many questions.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// One recent question.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RecentSearch {
    pub question: String,
    /// Whether an answer can be shown without asking again.
    pub cached: bool,
}

/// Output from the recent_searches tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RecentSearchesOutput {
    pub searches: Vec<RecentSearch>,
    /// Number of questions in history, before `limit` is applied.
    pub total: usize,
}

/// Implementation of the recent_searches tool.
pub async fn recent_impl(history: &SharedHistory, params: RecentSearchesParams) -> Result<CallToolResult, McpError> {
    let history = history.lock().await;
    let limit = params.limit.unwrap_or(usize::MAX);

    let searches = history
        .recent()
        .iter()
        .take(limit)
        .map(|question| RecentSearch {
            question: question.clone(),
            cached: history.is_cached(question),
        })
        .collect();

    json_result(&RecentSearchesOutput { searches, total: history.len() })
}

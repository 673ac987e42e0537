//! MCP tool implementations.
//!
//! This module contains all tools exposed by the govq server.

pub mod cached_answer;
pub mod clear_history;
pub mod dataset_search;
pub mod recent_searches;

pub use cached_answer::{CachedAnswerParams, cached_impl};
pub use clear_history::{ClearHistoryParams, clear_impl};
pub use dataset_search::{DatasetSearchParams, search_impl};
pub use recent_searches::{RecentSearchesParams, recent_impl};

use std::sync::Arc;

use govq_core::{Error, SearchHistoryStore};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;
use tokio::sync::Mutex;

/// Search history shared by every tool call.
pub type SharedHistory = Arc<Mutex<SearchHistoryStore>>;

/// Render a tool output as pretty JSON text content.
fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output).map_err(Error::from)?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use govq_client::{AskClient, AskConfig};
    use govq_core::{MemoryStorage, SearchHistoryStore};
    use rmcp::model::CallToolResult;
    use serde::de::DeserializeOwned;

    use super::SharedHistory;

    pub fn empty_history() -> SharedHistory {
        SharedHistory::new(tokio::sync::Mutex::new(SearchHistoryStore::load(MemoryStorage::new())))
    }

    /// Client whose endpoint refuses connections, so every ask falls back.
    pub async fn offline_client() -> AskClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        AskClient::new(&AskConfig {
            base_url: format!("http://{addr}/api"),
            timeout: Duration::from_secs(2),
            ..Default::default()
        })
        .unwrap()
    }

    pub fn parse_output<T: DeserializeOwned>(result: &CallToolResult) -> T {
        let content_val = serde_json::to_value(&result.content[0]).unwrap();
        let text = content_val
            .get("text")
            .and_then(|v| v.as_str())
            .expect("Expected text field in content");
        serde_json::from_str(text).unwrap()
    }
}

//! cached_answer tool implementation.
//!
//! Redisplays a previous answer without asking the QA service again.

use govq_core::{Dataset, Error};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{SharedHistory, json_result};

/// Parameters for the cached_answer tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CachedAnswerParams {
    /// The question exactly as previously asked.
    pub question: String,
}

/// Output from the cached_answer tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CachedAnswerOutput {
    pub question: String,
    pub answer: String,
    pub datasets: Vec<Dataset>,
}

/// Implementation of the cached_answer tool.
pub async fn cached_impl(history: &SharedHistory, params: CachedAnswerParams) -> Result<CallToolResult, McpError> {
    let question = params.question.trim();
    let cached = history
        .lock()
        .await
        .get_cached_answer(question)
        .ok_or_else(|| Error::CacheMiss(question.to_string()))?;

    json_result(&CachedAnswerOutput { question: question.to_string(), answer: cached.answer, datasets: cached.datasets })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{empty_history, parse_output};
    use govq_core::AskResponse;

    #[tokio::test]
    async fn test_cached_answer_missing() {
        let history = empty_history();
        history.lock().await.record_search("asked but unanswered", None);

        let params = CachedAnswerParams { question: "asked but unanswered".into() };
        let err = cached_impl(&history, params).await.unwrap_err();
        assert_eq!(err.code.0, -32001);
    }

    #[tokio::test]
    async fn test_cached_answer_found() {
        let history = empty_history();
        let response = AskResponse { answer: "Quarterly.".into(), datasets: vec![] };
        history.lock().await.record_search("gdp release cadence", Some(response));

        let params = CachedAnswerParams { question: " gdp release cadence ".into() };
        let result = cached_impl(&history, params).await.unwrap();
        let output: CachedAnswerOutput = parse_output(&result);
        assert_eq!(output.question, "gdp release cadence");
        assert_eq!(output.answer, "Quarterly.");
    }

    #[tokio::test]
    async fn test_exact_match_only() {
        let history = empty_history();
        let response = AskResponse { answer: "Quarterly.".into(), datasets: vec![] };
        history.lock().await.record_search("GDP", Some(response));

        let result = cached_impl(&history, CachedAnswerParams { question: "gdp".into() }).await;
        assert!(result.is_err());
    }
}

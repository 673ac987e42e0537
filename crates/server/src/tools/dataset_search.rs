//! dataset_search tool implementation.
//!
//! Answers a question with matching datasets, recording it in the search
//! history. Repeated questions are answered from the history cache.

use govq_client::{AskClient, AskRequest};
use govq_core::{AppConfig, Dataset, Error};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{SharedHistory, json_result};

/// Input parameters for dataset_search tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DatasetSearchParams {
    /// Natural-language question about government data.
    pub question: String,

    /// Ask the QA service even if a cached answer exists.
    #[serde(default)]
    pub force_refresh: bool,
}

/// Output structure for dataset_search tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DatasetSearchOutput {
    /// The question as recorded (trimmed).
    pub question: String,
    /// Prose answer.
    pub answer: String,
    /// Matching datasets.
    pub datasets: Vec<Dataset>,
    /// Whether the answer came from the search history cache.
    pub cache_hit: bool,
    /// Whether the QA service failed and the canned answer was used.
    pub fallback: bool,
}

/// Implementation of the dataset_search tool.
pub async fn search_impl(
    history: &SharedHistory, client: &AskClient, config: &AppConfig, params: DatasetSearchParams,
) -> Result<CallToolResult, McpError> {
    let req = AskRequest::new(&params.question);
    req.validate().map_err(Error::from)?;
    let question = req.question;

    if config.prefer_cached && !params.force_refresh {
        let mut history = history.lock().await;
        if let Some(cached) = history.get_cached_answer(&question) {
            tracing::debug!("cache hit for question: {}", question);
            history.record_search(&question, None);
            return json_result(&DatasetSearchOutput {
                question,
                answer: cached.answer,
                datasets: cached.datasets,
                cache_hit: true,
                fallback: false,
            });
        }
    }

    let outcome = client.ask_or_fallback(&question).await;

    history
        .lock()
        .await
        .record_search(&question, Some(outcome.response.clone()));

    json_result(&DatasetSearchOutput {
        question,
        answer: outcome.response.answer,
        datasets: outcome.response.datasets,
        cache_hit: false,
        fallback: outcome.fallback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{empty_history, offline_client, parse_output};
    use govq_core::AskResponse;

    fn cached_answer() -> AskResponse {
        AskResponse { answer: "Building approvals are monthly.".into(), datasets: vec![] }
    }

    #[tokio::test]
    async fn test_empty_question() {
        let history = empty_history();
        let client = offline_client().await;
        let params = DatasetSearchParams { question: "   ".into(), ..Default::default() };

        let result = search_impl(&history, &client, &AppConfig::default(), params).await;
        assert!(result.is_err());
        assert!(history.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_fallback_answer_is_recorded() {
        let history = empty_history();
        let client = offline_client().await;
        let params = DatasetSearchParams { question: "  youth unemployment  ".into(), ..Default::default() };

        let result = search_impl(&history, &client, &AppConfig::default(), params).await.unwrap();
        let output: DatasetSearchOutput = parse_output(&result);
        assert_eq!(output.question, "youth unemployment");
        assert!(output.fallback);
        assert!(!output.cache_hit);
        assert_eq!(output.datasets.len(), 1);

        let history = history.lock().await;
        assert_eq!(history.recent(), ["youth unemployment"]);
        let cached = history.get_cached_answer("youth unemployment").unwrap();
        assert_eq!(cached.answer, output.answer);
    }

    #[tokio::test]
    async fn test_cache_hit_moves_question_to_front() {
        let history = empty_history();
        {
            let mut h = history.lock().await;
            h.record_search("building approvals", Some(cached_answer()));
            h.record_search("rental vacancy", None);
        }
        let client = offline_client().await;
        let params = DatasetSearchParams { question: "building approvals".into(), ..Default::default() };

        let result = search_impl(&history, &client, &AppConfig::default(), params).await.unwrap();
        let output: DatasetSearchOutput = parse_output(&result);
        assert!(output.cache_hit);
        assert!(!output.fallback);
        assert_eq!(output.answer, "Building approvals are monthly.");

        let history = history.lock().await;
        assert_eq!(history.recent(), ["building approvals", "rental vacancy"]);
        assert_eq!(history.get_cached_answer("building approvals"), Some(cached_answer()));
    }

    #[tokio::test]
    async fn test_force_refresh_bypasses_cache() {
        let history = empty_history();
        history
            .lock()
            .await
            .record_search("building approvals", Some(cached_answer()));
        let client = offline_client().await;
        let params = DatasetSearchParams { question: "building approvals".into(), force_refresh: true };

        let result = search_impl(&history, &client, &AppConfig::default(), params).await.unwrap();
        let output: DatasetSearchOutput = parse_output(&result);
        assert!(!output.cache_hit);
        assert!(output.fallback);

        let cached = history.lock().await.get_cached_answer("building approvals").unwrap();
        assert_ne!(cached, cached_answer());
    }

    #[tokio::test]
    async fn test_prefer_cached_disabled() {
        let history = empty_history();
        history
            .lock()
            .await
            .record_search("building approvals", Some(cached_answer()));
        let client = offline_client().await;
        let config = AppConfig { prefer_cached: false, ..Default::default() };
        let params = DatasetSearchParams { question: "building approvals".into(), ..Default::default() };

        let result = search_impl(&history, &client, &config, params).await.unwrap();
        let output: DatasetSearchOutput = parse_output(&result);
        assert!(!output.cache_hit);
    }
}

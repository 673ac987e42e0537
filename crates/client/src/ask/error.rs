//! QA service client error types.

use std::sync::Arc;

/// Errors from the dataset QA service client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AskError {
    /// Question rejected before sending.
    #[error("invalid question: {0}")]
    InvalidQuestion(String),

    /// Configured base URL is unusable.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Non-success HTTP status.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for AskError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { AskError::Timeout } else { AskError::Network(Arc::new(err)) }
    }
}

impl From<AskError> for govq_core::Error {
    fn from(err: AskError) -> Self {
        match err {
            AskError::InvalidQuestion(msg) => govq_core::Error::InvalidInput(msg),
            AskError::HttpError { status } => govq_core::Error::HttpError(format!("HTTP {status}")),
            AskError::Timeout => govq_core::Error::AskTimeout(err.to_string()),
            _ => govq_core::Error::AskFailed(err.to_string()),
        }
    }
}

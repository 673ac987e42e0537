//! Unified error types for govq.
//!
//! Every variant renders with a stable code prefix so tool callers can match
//! on it without parsing free text.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error types for the govq crates.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty question).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// No cached answer for the given question.
    #[error("CACHE_MISS: {0}")]
    CacheMiss(String),

    /// SQLite operation failed.
    #[error("STORAGE_ERROR: {0}")]
    Database(#[from] rusqlite::Error),

    /// Migration failed to apply.
    #[error("STORAGE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// Persisted value could not be encoded or decoded.
    #[error("STORAGE_ERROR: serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error response from the QA service.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// QA service did not answer in time.
    #[error("ASK_TIMEOUT: {0}")]
    AskTimeout(String),

    /// QA service request failed for any other reason.
    #[error("ASK_FAILED: {0}")]
    AskFailed(String),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::AskFailed(msg) => (-32000, msg.clone()),
            Error::CacheMiss(msg) => (-32001, msg.clone()),
            Error::AskTimeout(msg) => (-32006, msg.clone()),
            Error::HttpError(msg) => (-32008, msg.clone()),
            Error::Database(e) => (-32002, e.to_string()),
            Error::MigrationFailed(msg) => (-32002, msg.clone()),
            Error::Serialization(e) => (-32002, e.to_string()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::CacheMiss("median rent".to_string());
        assert!(err.to_string().contains("CACHE_MISS"));
        assert!(err.to_string().contains("median rent"));
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::CacheMiss("median rent".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32001);

        let err = Error::InvalidInput("question cannot be empty".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32602);
    }

    #[test]
    fn test_serialization_error_is_storage_error() {
        let parse_err = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let err: Error = parse_err.into();
        assert!(err.to_string().starts_with("STORAGE_ERROR"));
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32002);
    }
}

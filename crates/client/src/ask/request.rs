//! QA service request body and validation.

use serde::Serialize;

use super::AskError;

/// Longest question accepted, in characters.
pub const MAX_QUESTION_CHARS: usize = 1000;

/// JSON body for `POST /ask`.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct AskRequest {
    pub question: String,
}

impl AskRequest {
    /// Build a request from user input, trimming surrounding whitespace.
    pub fn new(question: &str) -> Self {
        Self { question: question.trim().to_string() }
    }

    /// Validate the request.
    ///
    /// Returns an error if the question is empty or too long.
    pub fn validate(&self) -> Result<(), AskError> {
        if self.question.trim().is_empty() {
            return Err(AskError::InvalidQuestion("question cannot be empty".to_string()));
        }

        let chars = self.question.chars().count();
        if chars > MAX_QUESTION_CHARS {
            return Err(AskError::InvalidQuestion(format!(
                "question too long: {chars} chars (max {MAX_QUESTION_CHARS})"
            )));
        }

        Ok(())
    }
}

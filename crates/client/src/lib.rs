//! Client code for govq.
//!
//! This crate provides the HTTP client for the dataset QA service, including
//! response normalization and the canned fallback answer.

pub mod ask;

pub use ask::{AskClient, AskConfig, AskError, AskOutcome, AskRequest, fallback_response, quality_score_for};

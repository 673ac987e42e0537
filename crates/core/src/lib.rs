//! Core types and shared functionality for govq.
//!
//! This crate provides:
//! - Search history with a bounded recent list and a pruned answer cache
//! - Durable key/value storage (SQLite, in-memory)
//! - Dataset and answer types shared with the QA client
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod dataset;
pub mod error;
pub mod history;
pub mod storage;

pub use config::{AppConfig, ConfigError};
pub use dataset::{AskResponse, Dataset, QaEntry};
pub use error::Error;
pub use history::{MAX_RECENT, SearchHistoryStore};
pub use storage::{MemoryStorage, SqliteStorage, Storage};

//! Recent searches and their cached answers.
//!
//! `SearchHistoryStore` owns two structures that are always updated together:
//!
//! - the recent list: distinct questions, most-recent-first, at most
//!   [`MAX_RECENT`] entries
//! - the QA cache: question -> answer and datasets, whose keys are always a
//!   subset of the recent list
//!
//! Both are written together to [`Storage`] under [`RECENT_SEARCHES_KEY`] and
//! [`QA_MAP_KEY`] after every mutation. Storage faults never reach callers:
//! unreadable data loads as empty, failed writes are logged.

use std::collections::BTreeMap;

use crate::dataset::{AskResponse, QaEntry};
use crate::storage::Storage;

/// Maximum number of questions kept in the recent list.
pub const MAX_RECENT: usize = 20;

/// Storage key for the JSON array of recent questions.
pub const RECENT_SEARCHES_KEY: &str = "recentSearches";

/// Storage key for the JSON object mapping questions to cached answers.
pub const QA_MAP_KEY: &str = "qaMap";

/// Recent questions plus cached answers, persisted on every change.
pub struct SearchHistoryStore {
    recent: Vec<String>,
    cache: BTreeMap<String, QaEntry>,
    storage: Box<dyn Storage>,
}

impl std::fmt::Debug for SearchHistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchHistoryStore")
            .field("recent", &self.recent)
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl SearchHistoryStore {
    /// Load history from storage.
    ///
    /// A missing, unreadable or malformed value for either key loads as empty.
    /// The loaded list is deduplicated and truncated to [`MAX_RECENT`], and the
    /// cache is pruned to it. Nothing is written back.
    pub fn load(storage: impl Storage + 'static) -> Self {
        let storage: Box<dyn Storage> = Box::new(storage);

        let recent: Vec<String> = read_json(storage.as_ref(), RECENT_SEARCHES_KEY).unwrap_or_default();
        let cache: BTreeMap<String, QaEntry> = read_json(storage.as_ref(), QA_MAP_KEY).unwrap_or_default();

        let mut store = Self { recent: Vec::with_capacity(recent.len().min(MAX_RECENT)), cache, storage };
        for question in recent {
            if store.recent.len() == MAX_RECENT {
                break;
            }
            if !store.recent.contains(&question) {
                store.recent.push(question);
            }
        }
        store.prune();

        tracing::debug!(recent = store.recent.len(), cached = store.cache.len(), "loaded search history");
        store
    }

    /// Record a question as the most recent search, optionally caching its answer.
    ///
    /// An existing occurrence moves to the front; the tail is dropped beyond
    /// [`MAX_RECENT`]. Without `result` an existing cached answer for the same
    /// question is kept. Cached answers for evicted questions are dropped.
    ///
    /// Callers trim and reject empty questions; an empty question is ignored.
    pub fn record_search(&mut self, question: &str, result: Option<AskResponse>) {
        if question.is_empty() {
            tracing::debug!("ignoring empty question");
            return;
        }

        self.recent.retain(|q| q != question);
        self.recent.insert(0, question.to_string());
        self.recent.truncate(MAX_RECENT);

        if let Some(result) = result {
            self.cache.insert(question.to_string(), QaEntry::new(question, result));
        }
        self.prune();

        self.persist();
    }

    /// Cached answer for exactly this question, if one was recorded and not evicted.
    pub fn get_cached_answer(&self, question: &str) -> Option<AskResponse> {
        self.cache.get(question).map(QaEntry::to_response)
    }

    /// Whether a cached answer exists for exactly this question.
    pub fn is_cached(&self, question: &str) -> bool {
        self.cache.contains_key(question)
    }

    /// Forget all questions and cached answers.
    pub fn clear_all(&mut self) {
        self.recent.clear();
        self.cache.clear();
        self.persist();
    }

    /// Recent questions, most recent first.
    pub fn recent(&self) -> &[String] {
        &self.recent
    }

    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    /// Number of questions with a cached answer.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    fn prune(&mut self) {
        let recent = &self.recent;
        self.cache.retain(|question, _| recent.contains(question));
    }

    fn persist(&self) {
        if let Err(e) = self.try_persist() {
            tracing::warn!(error = %e, "failed to persist search history");
        }
    }

    /// Write both keys in one storage call.
    fn try_persist(&self) -> Result<(), crate::Error> {
        let recent = serde_json::to_string(&self.recent)?;
        let qa = serde_json::to_string(&self.cache)?;
        self.storage
            .set_many(&[(RECENT_SEARCHES_KEY, recent.as_str()), (QA_MAP_KEY, qa.as_str())])
    }
}

fn read_json<T: serde::de::DeserializeOwned>(storage: &dyn Storage, key: &str) -> Option<T> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read search history; starting empty");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "malformed search history; starting empty");
            None
        }
    }
}

//! QA service response normalization.

use std::collections::HashSet;

use govq_core::{AskResponse, Dataset};
use serde::Deserialize;
use sha2::{Digest, Sha256};

/// Lowest quality score assigned to datasets the service did not score.
pub const MIN_FILLED_SCORE: u8 = 60;

/// Highest quality score.
pub const MAX_SCORE: u8 = govq_core::dataset::MAX_QUALITY_SCORE;

/// Raw response body from the QA service.
#[derive(Debug, Deserialize)]
pub struct RawAskResponse {
    pub answer: String,
    #[serde(default, deserialize_with = "govq_core::dataset::null_as_default")]
    pub datasets: Vec<Dataset>,
}

impl From<RawAskResponse> for AskResponse {
    /// Drop untitled and repeated datasets (titles compared case-insensitively,
    /// first kept) and fill in missing quality scores.
    fn from(raw: RawAskResponse) -> Self {
        let mut seen = HashSet::new();
        let datasets = raw
            .datasets
            .into_iter()
            .filter_map(|mut d| {
                d.title = d.title.trim().to_string();
                if d.title.is_empty() || !seen.insert(d.title.to_lowercase()) {
                    return None;
                }
                fill_quality_score(&mut d);
                Some(d)
            })
            .collect();

        AskResponse { answer: raw.answer, datasets }
    }
}

/// Score in `MIN_FILLED_SCORE..=MAX_SCORE` derived from the dataset's title and URL.
///
/// Stable across runs so a cached dataset shows the same score it had when
/// first displayed.
pub fn quality_score_for(dataset: &Dataset) -> u8 {
    let mut hasher = Sha256::new();
    hasher.update(dataset.title.as_bytes());
    hasher.update(b"\n");
    hasher.update(dataset.url.as_bytes());
    let digest = hasher.finalize();

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let span = u64::from(MAX_SCORE - MIN_FILLED_SCORE) + 1;
    MIN_FILLED_SCORE + (u64::from_be_bytes(prefix) % span) as u8
}

/// Fill a missing score and clamp an out-of-range one.
pub fn fill_quality_score(dataset: &mut Dataset) {
    let score = match dataset.quality_score {
        Some(score) => score.min(MAX_SCORE),
        None => quality_score_for(dataset),
    };
    dataset.quality_score = Some(score);
}

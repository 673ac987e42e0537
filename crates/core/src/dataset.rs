//! Dataset descriptors and question/answer payloads.
//!
//! These are the shapes that cross the QA service boundary and the shapes
//! persisted by the search history, so the serde names match the wire format
//! (`downloadUrl`, `qualityScore`).

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Highest quality score.
pub const MAX_QUALITY_SCORE: u8 = 100;

/// One discoverable government dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Publishing agency, e.g. "Australian Bureau of Statistics".
    pub agency: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<String>,
    /// Release or last-updated date as reported by the service.
    #[serde(default, alias = "release_date", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// Quality score in 0..=100.
    #[serde(default, deserialize_with = "quality_score", skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<u8>,
}

/// An answer to a question: prose plus matching datasets.
///
/// This is both the QA service response body and the cached result held by
/// the search history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AskResponse {
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub datasets: Vec<Dataset>,
}

/// Persisted form of a cached answer, keyed by its question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaEntry {
    pub question: String,
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub datasets: Vec<Dataset>,
}

impl QaEntry {
    pub fn new(question: impl Into<String>, response: AskResponse) -> Self {
        Self { question: question.into(), answer: response.answer, datasets: response.datasets }
    }

    /// The cached result without its key.
    pub fn to_response(&self) -> AskResponse {
        AskResponse { answer: self.answer.clone(), datasets: self.datasets.clone() }
    }
}

/// Deserialize `null` the same as a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept any JSON number, rounded and clamped into `0..=MAX_QUALITY_SCORE`.
/// `null` and non-finite values read as unscored.
fn quality_score<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let score = Option::<f64>::deserialize(deserializer)?;
    Ok(score
        .filter(|s| s.is_finite())
        .map(|s| s.round().clamp(0.0, f64::from(MAX_QUALITY_SCORE)) as u8))
}

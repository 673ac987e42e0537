//! Dataset QA service client.
//!
//! Posts a natural-language question and returns the prose answer plus the
//! matching datasets.
//!
//! ### Protocol
//!
//! - **Endpoint**: `POST {base_url}/ask`
//! - **Body**: `{"question": "..."}`
//! - **Response**: `{"answer": "...", "datasets": [...]}`
//! - **Normalization**: untitled and duplicate datasets dropped, missing
//!   quality scores filled in.
//! - **Degradation**: [`AskClient::ask_or_fallback`] replaces any failure
//!   with a fixed canned answer so callers always have something to show.

pub mod error;
pub mod fallback;
pub mod request;
pub mod response;

pub use error::AskError;
pub use fallback::fallback_response;
pub use request::AskRequest;
pub use response::{RawAskResponse, quality_score_for};

use std::sync::Arc;
use std::time::{Duration, Instant};

use govq_core::{AppConfig, AskResponse};
use reqwest::header;

/// Default base URL for the QA service.
const DEFAULT_BASE_URL: &str = "https://govhack.koso.dev/api";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "govq/0.1";

/// QA client configuration.
#[derive(Debug, Clone)]
pub struct AskConfig {
    /// Service base URL; `/ask` is appended.
    pub base_url: String,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// User-agent string (default: govq/0.x).
    pub user_agent: String,
}

impl Default for AskConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&AppConfig> for AskConfig {
    fn from(config: &AppConfig) -> Self {
        Self { base_url: config.ask_base_url.clone(), timeout: config.timeout(), user_agent: config.user_agent.clone() }
    }
}

/// An answer together with whether it is the canned fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskOutcome {
    pub response: AskResponse,
    pub fallback: bool,
}

/// Dataset QA service client.
#[derive(Debug, Clone)]
pub struct AskClient {
    http: reqwest::Client,
    endpoint: url::Url,
}

impl AskClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &AskConfig) -> Result<Self, AskError> {
        let endpoint = ask_endpoint(&config.base_url)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| AskError::Network(Arc::new(e)))?;

        Ok(Self { http, endpoint })
    }

    /// The URL questions are posted to.
    pub fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }

    /// Ask a question.
    ///
    /// The question is trimmed and validated before anything is sent.
    pub async fn ask(&self, question: &str) -> Result<AskResponse, AskError> {
        let req = AskRequest::new(question);
        req.validate()?;

        let start = Instant::now();
        tracing::debug!("asking QA service: question={}", req.question);

        let http_response = self
            .http
            .post(self.endpoint.clone())
            .header(header::ACCEPT, "application/json")
            .json(&req)
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!("QA service response status: {}", status);

        if !status.is_success() {
            return Err(AskError::HttpError { status: status.as_u16() });
        }

        let bytes = http_response.bytes().await?;
        let raw: RawAskResponse = serde_json::from_slice(&bytes).map_err(|e| AskError::Parse(e.to_string()))?;
        let response = AskResponse::from(raw);

        tracing::debug!("answer received in {:?}, {} datasets", start.elapsed(), response.datasets.len());

        Ok(response)
    }

    /// Ask a question, substituting the canned fallback on any failure.
    pub async fn ask_or_fallback(&self, question: &str) -> AskOutcome {
        match self.ask(question).await {
            Ok(response) => AskOutcome { response, fallback: false },
            Err(e) => {
                tracing::warn!(error = %e, "QA request failed; using fallback answer");
                AskOutcome { response: fallback_response(), fallback: true }
            }
        }
    }
}

fn ask_endpoint(base_url: &str) -> Result<url::Url, AskError> {
    let base = format!("{}/", base_url.trim().trim_end_matches('/'));
    let base = url::Url::parse(&base).map_err(|e| AskError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(AskError::InvalidBaseUrl(format!("{base_url}: unsupported scheme")));
    }
    base.join("ask").map_err(|e| AskError::InvalidBaseUrl(e.to_string()))
}

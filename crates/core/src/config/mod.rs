//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (GOVQ_*)
//! 2. TOML config file (if GOVQ_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (GOVQ_*)
/// 2. TOML config file (if GOVQ_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the dataset QA service; questions are posted to `{base}/ask`.
    ///
    /// Set via GOVQ_ASK_BASE_URL environment variable.
    #[serde(default = "default_ask_base_url")]
    pub ask_base_url: String,

    /// Path to the SQLite file holding search history.
    ///
    /// Set via GOVQ_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via GOVQ_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via GOVQ_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Answer repeated questions from the history cache instead of the network.
    ///
    /// Set via GOVQ_PREFER_CACHED environment variable.
    #[serde(default = "default_true")]
    pub prefer_cached: bool,
}

fn default_ask_base_url() -> String {
    "https://govhack.koso.dev/api".into()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./govq-history.sqlite")
}

fn default_user_agent() -> String {
    "govq/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ask_base_url: default_ask_base_url(),
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            prefer_cached: true,
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `GOVQ_`
    /// 2. TOML file from `GOVQ_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("GOVQ_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("GOVQ_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.ask_base_url, "https://govhack.koso.dev/api");
        assert_eq!(config.db_path, PathBuf::from("./govq-history.sqlite"));
        assert_eq!(config.user_agent, "govq/0.1");
        assert_eq!(config.timeout_ms, 20_000);
        assert!(config.prefer_cached);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(20_000));
    }

    #[test]
    fn test_load_env_overrides() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("GOVQ_TIMEOUT_MS", "5000");
            jail.set_env("GOVQ_PREFER_CACHED", "false");
            jail.set_env("GOVQ_ASK_BASE_URL", "http://localhost:8000/api");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.timeout_ms, 5000);
            assert!(!config.prefer_cached);
            assert_eq!(config.ask_base_url, "http://localhost:8000/api");
            assert_eq!(config.user_agent, "govq/0.1");
            Ok(())
        });
    }

    #[test]
    fn test_load_toml_file_below_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("govq.toml", "user_agent = \"from-file\"\ntimeout_ms = 3000\n")?;
            jail.set_env("GOVQ_CONFIG_FILE", "govq.toml");
            jail.set_env("GOVQ_TIMEOUT_MS", "4000");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.user_agent, "from-file");
            assert_eq!(config.timeout_ms, 4000);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("GOVQ_TIMEOUT_MS", "10");

            let result = AppConfig::load();
            assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
            Ok(())
        });
    }
}

//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (GLIMPSE_*)
//! 2. TOML config file (if GLIMPSE_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Default base URL for the Wikimedia Commons Action API.
pub const DEFAULT_UPSTREAM_URL: &str = "https://commons.wikimedia.org/w/api.php";

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (GLIMPSE_*)
/// 2. TOML config file (if GLIMPSE_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// TCP port the HTTP server listens on.
    ///
    /// Set via GLIMPSE_PORT environment variable.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Comma-separated list of allowed CORS origins.
    ///
    /// Set via GLIMPSE_ALLOWED_ORIGINS environment variable.
    /// Empty means any origin is allowed.
    #[serde(default)]
    pub allowed_origins: String,

    /// Maximum requests per client per 60-second window.
    ///
    /// Set via GLIMPSE_RATE_LIMIT_PER_MINUTE environment variable.
    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_minute: u32,

    /// Base URL of the upstream search API.
    ///
    /// Set via GLIMPSE_UPSTREAM_BASE_URL environment variable.
    #[serde(default = "default_upstream_base_url")]
    pub upstream_base_url: String,

    /// User-Agent string for upstream requests.
    ///
    /// Set via GLIMPSE_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Upstream request timeout in milliseconds.
    ///
    /// Set via GLIMPSE_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Target width in pixels for requested thumbnails.
    ///
    /// Set via GLIMPSE_THUMB_SIZE environment variable.
    #[serde(default = "default_thumb_size")]
    pub thumb_size: u32,

    /// Comma-separated override for the safety-filter term list.
    ///
    /// Set via GLIMPSE_BLACKLIST environment variable.
    /// When unset the compiled-in default list is used.
    #[serde(default)]
    pub blacklist: Option<String>,
}

fn default_port() -> u16 {
    8080
}

fn default_rate_limit() -> u32 {
    30
}

fn default_upstream_base_url() -> String {
    DEFAULT_UPSTREAM_URL.into()
}

fn default_user_agent() -> String {
    "glimpse/0.1".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_thumb_size() -> u32 {
    640
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            allowed_origins: String::new(),
            rate_limit_per_minute: default_rate_limit(),
            upstream_base_url: default_upstream_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            thumb_size: default_thumb_size(),
            blacklist: None,
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Allowed CORS origins as a list. Empty list means any origin.
    pub fn origin_list(&self) -> Vec<String> {
        split_csv(&self.allowed_origins)
    }

    /// Safety-filter term override as a list, if configured.
    pub fn blacklist_terms(&self) -> Option<Vec<String>> {
        let terms = split_csv(self.blacklist.as_deref()?);
        if terms.is_empty() { None } else { Some(terms) }
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `GLIMPSE_`
    /// 2. TOML file from `GLIMPSE_CONFIG_FILE` (if set)
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

        if let Ok(config_path) = std::env::var("GLIMPSE_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("GLIMPSE_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rate_limit_per_minute, 30);
        assert_eq!(config.upstream_base_url, DEFAULT_UPSTREAM_URL);
        assert_eq!(config.user_agent, "glimpse/0.1");
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.thumb_size, 640);
        assert!(config.allowed_origins.is_empty());
        assert!(config.blacklist.is_none());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(10_000));
    }

    #[test]
    fn test_origin_list_empty_means_any() {
        let config = AppConfig::default();
        assert!(config.origin_list().is_empty());
    }

    #[test]
    fn test_origin_list_splits_and_trims() {
        let config = AppConfig {
            allowed_origins: "https://a.example, https://b.example ,".into(),
            ..Default::default()
        };
        assert_eq!(config.origin_list(), vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_blacklist_terms_unset() {
        let config = AppConfig::default();
        assert!(config.blacklist_terms().is_none());
    }

    #[test]
    fn test_blacklist_terms_override() {
        let config = AppConfig { blacklist: Some("foo, bar".into()), ..Default::default() };
        assert_eq!(config.blacklist_terms().unwrap(), vec!["foo", "bar"]);
    }

    #[test]
    fn test_blacklist_terms_blank_is_none() {
        let config = AppConfig { blacklist: Some(" , ".into()), ..Default::default() };
        assert!(config.blacklist_terms().is_none());
    }
}

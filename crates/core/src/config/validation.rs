//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `rate_limit_per_minute` is 0
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `upstream_base_url` is not an http(s) URL
    /// - `user_agent` is empty
    /// - `thumb_size` is 0 or exceeds 4096
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rate_limit_per_minute == 0 {
            return Err(ConfigError::Invalid {
                field: "rate_limit_per_minute".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if !self.upstream_base_url.starts_with("http://") && !self.upstream_base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                field: "upstream_base_url".into(),
                reason: "must be an http(s) URL".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.thumb_size == 0 || self.thumb_size > 4096 {
            return Err(ConfigError::Invalid {
                field: "thumb_size".into(),
                reason: "must be between 1 and 4096".into(),
            });
        }

        if self.blacklist.is_some() && self.blacklist_terms().is_none() {
            tracing::warn!(
                "blacklist override is set but contains no terms; \
                 the default term list will be used"
            );
        }

        Ok(())
    }
}

//! Shared application state.
//!
//! Everything here is read-only after startup except the rate limiter's
//! counters, which manage their own locking.

use std::sync::Arc;

use glimpse_client::{CommonsClient, CommonsConfig};
use glimpse_core::{AppConfig, RateLimiter, SafetyFilter};

/// Shared application state, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub client: CommonsClient,
    pub filter: Arc<SafetyFilter>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Build state from loaded configuration.
    pub fn new(config: AppConfig) -> Result<Self, glimpse_client::CommonsError> {
        let client = CommonsClient::new(CommonsConfig {
            base_url: config.upstream_base_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
            thumb_size: config.thumb_size,
        })?;

        let filter = match config.blacklist_terms() {
            Some(terms) => SafetyFilter::new(terms),
            None => SafetyFilter::default(),
        };

        let limiter = RateLimiter::new(config.rate_limit_per_minute);

        Ok(Self { config: Arc::new(config), client, filter: Arc::new(filter), limiter: Arc::new(limiter) })
    }
}

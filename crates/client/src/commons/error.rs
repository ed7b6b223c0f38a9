//! Commons API client error types.

use std::sync::Arc;

/// Errors from the Wikimedia Commons API client.
#[derive(Debug, thiserror::Error)]
pub enum CommonsError {
    /// Query was empty or whitespace-only.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Non-success status from the upstream API.
    #[error("upstream error: HTTP {status}")]
    Upstream { status: u16 },

    /// Request timeout.
    #[error("upstream request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for CommonsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { CommonsError::Timeout } else { CommonsError::Network(Arc::new(err)) }
    }
}

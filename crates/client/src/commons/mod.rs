//! Wikimedia Commons search client.
//!
//! Thin wrapper over the MediaWiki Action API:
//!
//! - **Endpoint**: `https://commons.wikimedia.org/w/api.php`
//! - **Authentication**: none required.
//! - **Pagination**: offset-based via `gsroffset`, computed from
//!   `(page, per_page)` before the request is built.
//! - **Normalization**: heterogeneous page records become
//!   [`NormalizedResult`]s; records without any usable image URL are dropped.
//!
//! One inbound request maps to exactly one upstream call. No retries, no
//! caching, no request collapsing.

pub mod error;
pub mod request;
pub mod response;

pub use error::CommonsError;
pub use request::{PER_PAGE_DEFAULT, PER_PAGE_MAX, PER_PAGE_MIN, SearchQuery};
pub use response::{CommonsApiResponse, CommonsPage, NormalizedResult, strip_html};

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "glimpse/0.1";

/// Default thumbnail target width in pixels.
const DEFAULT_THUMB_SIZE: u32 = 640;

/// Commons API client configuration.
#[derive(Debug, Clone)]
pub struct CommonsConfig {
    /// Base URL (default: https://commons.wikimedia.org/w/api.php).
    pub base_url: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string (default: glimpse/0.x).
    pub user_agent: String,
    /// Thumbnail render width requested upstream (default: 640).
    pub thumb_size: u32,
}

impl Default for CommonsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://commons.wikimedia.org/w/api.php".to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            thumb_size: DEFAULT_THUMB_SIZE,
        }
    }
}

/// Wikimedia Commons search client.
#[derive(Debug, Clone)]
pub struct CommonsClient {
    http: reqwest::Client,
    config: CommonsConfig,
}

impl CommonsClient {
    /// Create a new Commons client with the given configuration.
    pub fn new(config: CommonsConfig) -> Result<Self, CommonsError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| CommonsError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }

    /// Execute a search and return normalized results in upstream order.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<NormalizedResult>, CommonsError> {
        query.validate()?;

        let start = Instant::now();
        let params = query.params(self.config.thumb_size);

        tracing::debug!("searching Commons: query={} offset={}", query.q, query.offset());

        let http_response = self
            .http
            .get(&self.config.base_url)
            .header(header::ACCEPT, "application/json")
            .query(&params)
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!("Commons API response status: {}", status);

        if status.is_client_error() || status.is_server_error() {
            return Err(CommonsError::Upstream { status: status.as_u16() });
        }

        let bytes = http_response.bytes().await?;
        let api_response: CommonsApiResponse =
            serde_json::from_slice(&bytes).map_err(|e| CommonsError::Parse(e.to_string()))?;

        let results = api_response.normalize();

        tracing::debug!("search completed in {:?}, {} results", start.elapsed(), results.len());

        Ok(results)
    }
}

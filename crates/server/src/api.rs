//! REST API handlers.

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use glimpse_client::{NormalizedResult, PER_PAGE_DEFAULT, SearchQuery};
use glimpse_core::SafeMode;

use crate::error::ApiError;
use crate::state::AppState;

/// Raw query parameters for `GET /api/search`.
///
/// Numbers arrive as strings and are parsed leniently: anything unparseable
/// falls back to its default instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub safe: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

/// Response body for `GET /api/search`.
///
/// `count` always equals `results.len()`; total upstream matches are not
/// reported.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub page: u32,
    pub per_page: u32,
    pub count: usize,
    pub results: Vec<NormalizedResult>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub upstream: String,
}

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_string(), upstream: state.config.upstream_base_url.clone() })
}

/// `GET /api/search`: validate, fetch, normalize, filter, respond.
pub async fn search(
    State(state): State<AppState>, Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let (query, mode) = resolve_params(&params)?;

    let records = state.client.search(&query).await?;

    let results: Vec<NormalizedResult> = records
        .into_iter()
        .filter(|r| state.filter.allows(mode, &r.title, &r.description))
        .collect();

    Ok(Json(SearchResponse {
        query: query.q,
        page: query.page,
        per_page: query.per_page,
        count: results.len(),
        results,
    }))
}

/// Apply defaults, flooring, and clamping to the raw parameters.
///
/// Fails only on a missing/blank `q`; this happens before any upstream call.
fn resolve_params(params: &SearchParams) -> Result<(SearchQuery, SafeMode), ApiError> {
    let q = params.q.as_deref().map(str::trim).unwrap_or("");
    if q.is_empty() {
        return Err(ApiError::MissingQuery);
    }

    let mode = SafeMode::from_param(params.safe.as_deref());
    let page = parse_or(params.page.as_deref(), 1);
    let per_page = parse_or(params.per_page.as_deref(), PER_PAGE_DEFAULT);

    Ok((SearchQuery::new(q, page, per_page), mode))
}

fn parse_or(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

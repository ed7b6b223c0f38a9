//! Rate-limiting middleware.
//!
//! Runs before the API handlers; one increment-and-check per request against
//! the shared fixed-window limiter.

use std::net::SocketAddr;

use axum::Json;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ErrorResponse;
use crate::state::AppState;

/// Reject the request with 429 once the client's window budget is spent.
pub async fn rate_limit(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let key = client_key(&req);

    if !state.limiter.check(&key) {
        tracing::debug!("rate limit exceeded for {}", key);
        return (StatusCode::TOO_MANY_REQUESTS, Json(ErrorResponse::new("Too many requests"))).into_response();
    }

    next.run(req).await
}

/// Client identity: first `X-Forwarded-For` hop when present, else the peer
/// address.
fn client_key(req: &Request) -> String {
    if let Some(forwarded) = req.headers().get("x-forwarded-for")
        && let Ok(value) = forwarded.to_str()
        && let Some(first) = value.split(',').next()
        && !first.trim().is_empty()
    {
        return first.trim().to_string();
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

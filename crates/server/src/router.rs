//! Router assembly: API routes, middleware stack, static fallback.

use axum::http::HeaderValue;
use axum::routing::get;
use axum::{Router, middleware};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{api, assets, limit};

/// Build the full application router.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.origin_list());

    let api_routes = Router::new()
        .route("/search", get(api::search))
        .route("/health", get(api::health))
        .layer(middleware::from_fn_with_state(state.clone(), limit::rate_limit));

    Router::new()
        .nest("/api", api_routes)
        .fallback(assets::static_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy from configuration; an empty origin list allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring unparseable CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new().allow_origin(parsed).allow_methods(Any).allow_headers(Any)
}

//! glimpse server entry point.
//!
//! Loads configuration, builds the router, and serves HTTP until shutdown.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod api;
mod assets;
mod error;
mod limit;
mod router;
mod state;

use glimpse_core::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load()?;
    let port = config.port;

    let state = state::AppState::new(config)?;
    let app = router::create_router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("starting glimpse server on http://localhost:{}", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<std::net::SocketAddr>()).await?;

    Ok(())
}

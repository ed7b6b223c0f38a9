//! Embedded static frontend.
//!
//! The bundle under `static/` is compiled into the binary; unknown paths
//! without a file extension fall back to `index.html` for SPA routing.

use axum::body::Body;
use axum::http::{StatusCode, Uri, header};
use axum::response::Response;
use rust_embed::RustEmbed;

/// Embedded static files for the frontend.
#[derive(RustEmbed)]
#[folder = "static/"]
struct StaticAssets;

/// Serve embedded static files.
pub async fn static_handler(uri: Uri) -> Response<Body> {
    let path = uri.path().trim_start_matches('/');

    if let Some(content) = StaticAssets::get(path) {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        return asset_response(StatusCode::OK, mime.as_ref(), content.data.to_vec());
    }

    // SPA fallback: non-file paths get the index page.
    if (path.is_empty() || !path.contains('.'))
        && let Some(content) = StaticAssets::get("index.html")
    {
        return asset_response(StatusCode::OK, "text/html", content.data.to_vec());
    }

    asset_response(StatusCode::NOT_FOUND, "text/plain", b"Not Found".to_vec())
}

fn asset_response(status: StatusCode, content_type: &str, body: Vec<u8>) -> Response<Body> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap_or_default()
}

//! Home Route
//!
//! Static welcome envelope at `/` plus the plain-text 404 for unknown paths.

use axum::{http::StatusCode, response::IntoResponse, routing::any, Router};
use serde_json::json;

use super::envelope::Envelope;

/// Root route; answers every method
pub fn home_routes() -> Router {
    Router::new().route("/", any(home_handler))
}

async fn home_handler() -> Envelope {
    Envelope::success(
        "Welcome to the crudbox API server",
        Some(json!({ "version": env!("CARGO_PKG_VERSION") })),
    )
}

/// Router-wide fallback for paths nothing else matches
pub async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 page not found")
}

//! Command Execution Route
//!
//! Hands the request's command line to the configured
//! [`CommandExecutor`](crate::exec::CommandExecutor). With the default policy
//! nothing is filtered, sandboxed or timed out.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, routing::post, Router};
use serde::Deserialize;
use serde_json::json;

use super::envelope::{ok, Envelope};
use super::errors::{method_not_supported, ApiError, ApiResult};
use super::request::decode_body;
use super::state::AppContext;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExecRequest {
    command: String,
}

/// Exec routes with shared state
pub fn exec_routes(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/exec", post(exec_handler).fallback(method_not_supported))
        .with_state(ctx)
}

async fn exec_handler(State(ctx): State<Arc<AppContext>>, body: Bytes) -> ApiResult<Envelope> {
    let request: ExecRequest = decode_body(&body)?;

    let executor = ctx.executor.clone();
    let output = tokio::task::spawn_blocking(move || executor.execute(&request.command))
        .await
        .map_err(|e| ApiError::Internal(format!("command execution failed: {e}")))??;

    ok("command executed", json!({ "output": output }))
}

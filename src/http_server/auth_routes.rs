//! Auth HTTP Routes
//!
//! Login endpoint on top of [`AuthService`](crate::auth::AuthService).

use std::sync::Arc;

use axum::{body::Bytes, extract::State, routing::post, Router};
use tracing::warn;

use super::envelope::{ok, Envelope};
use super::errors::{method_not_supported, ApiError, ApiResult};
use super::request::decode_body;
use super::state::AppContext;
use crate::auth::AuthError;
use crate::models::Credentials;

/// Auth routes with shared state
pub fn auth_routes(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/login", post(login_handler).fallback(method_not_supported))
        .with_state(ctx)
}

/// Login handler
async fn login_handler(State(ctx): State<Arc<AppContext>>, body: Bytes) -> ApiResult<Envelope> {
    let credentials: Credentials = decode_body(&body)?;

    let username = credentials.username.clone();

    let response = ctx.auth.login(credentials).await.map_err(|e| {
        if matches!(e, AuthError::InvalidCredentials) {
            warn!(username = %username, "login rejected");
        }
        ApiError::from(e)
    })?;

    ok("login successful", response)
}

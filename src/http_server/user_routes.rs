//! User HTTP Routes
//!
//! CRUD over the `users` table. Passwords travel and persist in plaintext.
//!
//! Everything below `/users/` is one resource: the remainder of the path is
//! parsed as the id before the method is considered, so `/users/`,
//! `/users/1/2` and `/users/abc` all answer 400 whatever the method.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::Method,
    routing::{any, get},
    Router,
};

use super::envelope::{ok, Envelope};
use super::errors::{method_not_supported, ApiError, ApiResult};
use super::request::{decode_body, parse_id};
use super::state::AppContext;
use crate::models::User;
use crate::store::{users, UserLookup};

/// User routes with shared state
pub fn user_routes(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route(
            "/users",
            get(list_users_handler)
                .head(method_not_supported)
                .post(create_user_handler)
                .fallback(method_not_supported),
        )
        .route("/users/", any(user_by_id_handler))
        .route("/users/*rest", any(user_by_id_handler))
        .with_state(ctx)
}

// ==================
// Handlers
// ==================

async fn list_users_handler(State(ctx): State<Arc<AppContext>>) -> ApiResult<Envelope> {
    let users = ctx
        .store
        .call(users::fetch_users)
        .await
        .map_err(|e| ApiError::from_read(e, "user not found"))?;

    ok("user list retrieved", users)
}

async fn create_user_handler(
    State(ctx): State<Arc<AppContext>>,
    body: Bytes,
) -> ApiResult<Envelope> {
    let user: User = decode_body(&body)?;

    let created = ctx
        .store
        .call(move |conn| users::create_user(conn, &user))
        .await
        .map_err(|e| ApiError::from_write(e, "user creation failed"))?;

    ok("user created", created)
}

async fn user_by_id_handler(
    State(ctx): State<Arc<AppContext>>,
    method: Method,
    raw_id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> ApiResult<Envelope> {
    // An empty or undecodable remainder fails the parse like any other junk.
    let raw_id = raw_id.map(|Path(raw)| raw).unwrap_or_default();
    let id = parse_id(&raw_id, "invalid user id")?;

    match method {
        Method::GET => get_user(&ctx, id).await,
        Method::PUT => update_user(&ctx, id, &body).await,
        Method::DELETE => delete_user(&ctx, id).await,
        _ => Err(ApiError::MethodNotAllowed),
    }
}

async fn get_user(ctx: &AppContext, id: i64) -> ApiResult<Envelope> {
    let lookup = ctx.store.user_lookup();
    let user = ctx
        .store
        .call(move |conn| match lookup {
            UserLookup::Interpolated => users::fetch_user_interpolated(conn, id),
            UserLookup::Bound => users::fetch_user(conn, id),
        })
        .await
        .map_err(|e| ApiError::from_read(e, "user not found"))?;

    ok("user retrieved", user)
}

async fn update_user(ctx: &AppContext, id: i64, body: &Bytes) -> ApiResult<Envelope> {
    let user: User = decode_body(body)?;

    let updated = ctx
        .store
        .call(move |conn| users::update_user(conn, id, &user))
        .await
        .map_err(|e| ApiError::from_write(e, "user update failed"))?;

    ok("user updated", updated)
}

async fn delete_user(ctx: &AppContext, id: i64) -> ApiResult<Envelope> {
    ctx.store
        .call(move |conn| users::delete_user(conn, id))
        .await
        .map_err(|e| ApiError::from_write(e, "user deletion failed"))?;

    Ok(Envelope::success("user deleted", None))
}

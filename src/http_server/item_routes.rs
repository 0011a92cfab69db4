//! Item HTTP Routes

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
use crate::models::Item;
use crate::store::items;

/// Item routes with shared state
pub fn item_routes(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route(
            "/items",
            get(list_items_handler)
                .head(method_not_supported)
                .post(create_item_handler)
                .fallback(method_not_supported),
        )
        .route("/items/", any(item_by_id_handler))
        .route("/items/*rest", any(item_by_id_handler))
        .with_state(ctx)
}

async fn list_items_handler(State(ctx): State<Arc<AppContext>>) -> ApiResult<Envelope> {
    let items = ctx
        .store
        .call(items::fetch_items)
        .await
        .map_err(|e| ApiError::from_read(e, "item not found"))?;

    ok("item list retrieved", items)
}

async fn create_item_handler(
    State(ctx): State<Arc<AppContext>>,
    body: Bytes,
) -> ApiResult<Envelope> {
    let item: Item = decode_body(&body)?;

    let created = ctx
        .store
        .call(move |conn| items::create_item(conn, &item))
        .await
        .map_err(|e| ApiError::from_write(e, "item creation failed"))?;

    ok("item created", created)
}

/// Id first, then method
async fn item_by_id_handler(
    State(ctx): State<Arc<AppContext>>,
    method: Method,
    raw_id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> ApiResult<Envelope> {
    let raw_id = raw_id.map(|Path(raw)| raw).unwrap_or_default();
    let id = parse_id(&raw_id, "invalid item id")?;

    match method {
        Method::GET => {
            let item = ctx
                .store
                .call(move |conn| items::fetch_item(conn, id))
                .await
                .map_err(|e| ApiError::from_read(e, "item not found"))?;

            ok("item retrieved", item)
        }
        Method::PUT => {
            let item: Item = decode_body(&body)?;

            let updated = ctx
                .store
                .call(move |conn| items::update_item(conn, id, &item))
                .await
                .map_err(|e| ApiError::from_write(e, "item update failed"))?;

            ok("item updated", updated)
        }
        Method::DELETE => {
            ctx.store
                .call(move |conn| items::delete_item(conn, id))
                .await
                .map_err(|e| ApiError::from_write(e, "item deletion failed"))?;

            Ok(Envelope::success("item deleted", None))
        }
        _ => Err(ApiError::MethodNotAllowed),
    }
}

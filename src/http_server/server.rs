//! # HTTP Server
//!
//! Main HTTP server combining all endpoint routers.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::auth_routes::auth_routes;
use super::config::HttpServerConfig;
use super::exec_routes::exec_routes;
use super::file_routes::file_routes;
use super::home_routes::{home_routes, not_found_handler};
use super::item_routes::item_routes;
use super::state::AppContext;
use super::user_routes::user_routes;

/// HTTP server for the crudbox API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over an application context
    pub fn new(config: HttpServerConfig, ctx: Arc<AppContext>) -> Self {
        Self {
            config,
            router: build_router(ctx),
        }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is terminated
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        info!(addr = %listener.local_addr()?, "crudbox API listening");

        axum::serve(listener, self.router).await
    }
}

/// Build the combined router with all endpoints
pub fn build_router(ctx: Arc<AppContext>) -> Router {
    let api = Router::new()
        .merge(user_routes(ctx.clone()))
        .merge(item_routes(ctx.clone()))
        .merge(auth_routes(ctx.clone()))
        .merge(exec_routes(ctx.clone()))
        .merge(file_routes(ctx));

    Router::new()
        .merge(home_routes())
        .nest("/api", api)
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
}

//! # HTTP Server Module
//!
//! Axum router for the JSON API. Every JSON route answers with the
//! `{status, message, data?}` envelope.
//!
//! # Endpoints
//!
//! - `/` - Welcome envelope
//! - `/api/users`, `/api/users/:id` - User CRUD
//! - `/api/items`, `/api/items/:id` - Item CRUD
//! - `/api/login` - Plaintext credential check, returns a token
//! - `/api/exec` - Shell command execution
//! - `/api/files?filename=` - Raw file download

pub mod config;
pub mod envelope;
pub mod errors;
pub mod request;
pub mod state;
pub mod server;
pub mod home_routes;
pub mod user_routes;
pub mod item_routes;
pub mod auth_routes;
pub mod exec_routes;
pub mod file_routes;

pub use config::HttpServerConfig;
pub use envelope::{Envelope, Status};
pub use errors::{ApiError, ApiResult};
pub use server::{build_router, HttpServer};
pub use state::AppContext;

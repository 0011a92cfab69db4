//! crudbox - a minimal JSON CRUD service over an embedded SQLite store
//!
//! Users and items behind a uniform response envelope, plus login, shell
//! execution and raw file retrieval endpoints whose safety gates are chosen
//! by configuration.

pub mod auth;
pub mod cli;
pub mod exec;
pub mod file_storage;
pub mod http_server;
pub mod models;
pub mod store;

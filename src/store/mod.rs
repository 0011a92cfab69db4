//! # Record Store
//!
//! Embedded SQLite persistence for users and items. The connection module
//! owns the file, schema and seed rows; the entity modules hold one function
//! per (entity, operation) pair, each issuing a single statement.

pub mod errors;
pub mod connection;
pub mod users;
pub mod items;

pub use errors::{StoreError, StoreResult};
pub use connection::{store_exists, SeedConfig, Store, StoreConfig, UserLookup};

//! # Domain Models
//!
//! Records persisted by the store and the request bodies that carry them.
//! Every field defaults to its zero value so partially filled JSON bodies
//! still decode; the identifier in a body is never trusted by the handlers.

use serde::{Deserialize, Serialize};

/// A user account row from the `users` table.
///
/// The password is stored and returned verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub email: String,
    pub role: String,
}

/// A catalogue item row from the `items` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
}

/// Login request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// The subset of a user returned after a successful credential match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
    pub role: String,
}

//! # Login Tokens
//!
//! Token issuance is a strategy behind [`TokenIssuer`] so the login flow does
//! not care how tokens are built. The shipped [`DigestTokenIssuer`] hashes
//! the username together with a shared secret: the result is deterministic,
//! never expires and carries no nonce.

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::models::AuthenticatedUser;

/// Issues a bearer token for an authenticated user
pub trait TokenIssuer: Send + Sync + std::fmt::Debug {
    fn issue(&self, user: &AuthenticatedUser) -> String;
}

/// Digest used by [`DigestTokenIssuer`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenScheme {
    #[default]
    Md5,
    Sha256,
}

/// Auth configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret appended to the username before hashing
    /// (default: "super_secret_key_1234")
    #[serde(default = "default_shared_secret")]
    pub shared_secret: String,

    /// Digest for login tokens (default: md5)
    #[serde(default)]
    pub token_scheme: TokenScheme,
}

fn default_shared_secret() -> String {
    "super_secret_key_1234".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            shared_secret: default_shared_secret(),
            token_scheme: TokenScheme::default(),
        }
    }
}

/// Hex digest of `username || secret`
#[derive(Debug, Clone)]
pub struct DigestTokenIssuer {
    secret: String,
    scheme: TokenScheme,
}

impl DigestTokenIssuer {
    pub fn new(secret: impl Into<String>, scheme: TokenScheme) -> Self {
        Self {
            secret: secret.into(),
            scheme,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.shared_secret.clone(), config.token_scheme)
    }

    /// Token for a bare username
    pub fn token_for(&self, username: &str) -> String {
        let input = format!("{}{}", username, self.secret);
        match self.scheme {
            TokenScheme::Md5 => format!("{:x}", Md5::digest(input.as_bytes())),
            TokenScheme::Sha256 => format!("{:x}", Sha256::digest(input.as_bytes())),
        }
    }
}

impl TokenIssuer for DigestTokenIssuer {
    fn issue(&self, user: &AuthenticatedUser) -> String {
        self.token_for(&user.username)
    }
}

//! # Auth Module
//!
//! Single plaintext-credential lookup and pluggable token issuance. There is
//! no session state: a token is a pure function of the username and secret.

pub mod errors;
pub mod token;
pub mod api;

pub use errors::{AuthError, AuthResult};
pub use token::{AuthConfig, DigestTokenIssuer, TokenIssuer, TokenScheme};
pub use api::{AuthService, LoginResponse};

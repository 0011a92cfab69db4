//! # Auth Service
//!
//! Plaintext credential check against the store plus token issuance.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::errors::AuthResult;
use super::token::TokenIssuer;
use crate::models::{AuthenticatedUser, Credentials};
use crate::store::{users, Store};

/// Successful login payload
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: AuthenticatedUser,
    pub token: String,
}

/// Login service
#[derive(Debug, Clone)]
pub struct AuthService {
    store: Arc<Store>,
    issuer: Arc<dyn TokenIssuer>,
}

impl AuthService {
    pub fn new(store: Arc<Store>, issuer: Arc<dyn TokenIssuer>) -> Self {
        Self { store, issuer }
    }

    /// Look up the credentials with a single equality match and issue a token
    /// for the matched user.
    pub async fn login(&self, credentials: Credentials) -> AuthResult<LoginResponse> {
        let user = self
            .store
            .call(move |conn| users::find_by_credentials(conn, &credentials))
            .await?;

        let token = self.issuer.issue(&user);
        info!(user_id = user.id, username = %user.username, "login succeeded");

        Ok(LoginResponse { user, token })
    }
}

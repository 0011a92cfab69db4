//! Application Context
//!
//! Everything handlers share, built once at startup and handed to the router.

use std::sync::Arc;

use crate::auth::{AuthService, TokenIssuer};
use crate::exec::CommandExecutor;
use crate::file_storage::FileAccessor;
use crate::store::Store;

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppContext {
    pub store: Arc<Store>,
    pub auth: AuthService,
    pub executor: Arc<dyn CommandExecutor>,
    pub files: Arc<dyn FileAccessor>,
}

impl AppContext {
    pub fn new(
        store: Arc<Store>,
        issuer: Arc<dyn TokenIssuer>,
        executor: Arc<dyn CommandExecutor>,
        files: Arc<dyn FileAccessor>,
    ) -> Self {
        Self {
            auth: AuthService::new(store.clone(), issuer),
            store,
            executor,
            files,
        }
    }
}

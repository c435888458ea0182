// Application state shared across all modules

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::auth::tokens::TokenService;
use crate::services::{CatalogClient, CredentialStore};

/// Application state containing the credential store, services, and configuration
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CredentialStore>,
    pub tokens: Arc<TokenService>,
    pub catalog: Arc<CatalogClient>,
}

/// Handle installed as an `Extension` on the router
pub type SharedState = Arc<RwLock<AppState>>;

impl AppState {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        tokens: TokenService,
        catalog: CatalogClient,
    ) -> Self {
        Self {
            store,
            tokens: Arc::new(tokens),
            catalog: Arc::new(catalog),
        }
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }
}

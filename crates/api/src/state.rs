use std::sync::Arc;

use promptbook_store::{HttpStore, MemoryStore, StoreResult, TemplateStore};

use crate::config::{ServerConfig, StoreBackend};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Template store chosen at startup; handlers never know which backend it is.
    pub store: Arc<dyn TemplateStore>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn TemplateStore>, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Construct the configured store backend.
pub fn build_store(config: &ServerConfig) -> StoreResult<Arc<dyn TemplateStore>> {
    let store: Arc<dyn TemplateStore> = match config.store_backend {
        StoreBackend::Memory if config.seed_fixtures => Arc::new(MemoryStore::with_fixtures()),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Http => Arc::new(HttpStore::new(&config.store_url)?),
    };
    Ok(store)
}

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use config::{Config, Storage};
use db::memory::MemoryStore;
use db::pg::PgStore;
use db::store::Store;

/// Shared application state available to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build the state with the store selected by `config.storage`.
    pub fn from_config(config: Config) -> Self {
        let store: Arc<dyn Store> = match &config.storage {
            Storage::Postgres {
                database_url,
                pool_size,
            } => Arc::new(PgStore::new(db::pool::connect(database_url, *pool_size))),
            Storage::Memory => {
                tracing::warn!("using in-memory storage; data will not survive a restart");
                Arc::new(MemoryStore::new())
            }
        };

        Self {
            store,
            config: Arc::new(config),
        }
    }
}

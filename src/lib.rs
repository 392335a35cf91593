pub mod config;
pub mod db;
pub mod error;
pub mod migrate;
pub mod observability;
pub mod routes;
pub mod server;

use menuplan_store::{MemoryStore, SqliteStore, Store};
use std::sync::Arc;

pub use config::Config;
pub use routes::{AppState, router};

/// Builds the store selected by `storage.backend`. The sqlite store is
/// migrated before it is handed out.
pub async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn Store>> {
    match config.storage.backend {
        config::StorageBackend::Memory => {
            tracing::info!("Using in-memory store");

            Ok(Arc::new(MemoryStore::default()))
        }
        config::StorageBackend::Sqlite => {
            tracing::info!(url = %config.database.url, "Using sqlite store");

            let pool =
                db::create_pool(&config.database.url, config.database.max_connections).await?;
            menuplan_db::migrate(&pool).await?;

            Ok(Arc::new(SqliteStore::new(pool)))
        }
    }
}

//! Storage implementations for different backends

use crate::config::{StoreBackend, StoreConfig};
use crate::core::FoodStore;
#[cfg(not(feature = "mongodb_backend"))]
use crate::core::error::StorageError;
use anyhow::Result;
use std::sync::Arc;

pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

pub use in_memory::InMemoryFoodStore;
#[cfg(feature = "mongodb_backend")]
pub use mongodb::MongoFoodStore;

/// Open the store selected by `config`
///
/// For MongoDB the secondary indexes are created before the store is returned.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn FoodStore>> {
    match config.backend {
        StoreBackend::InMemory => {
            tracing::info!("Using in-memory food store");
            Ok(Arc::new(InMemoryFoodStore::new()))
        }
        #[cfg(feature = "mongodb_backend")]
        StoreBackend::Mongodb => {
            let store = MongoFoodStore::connect(
                &config.uri,
                &config.database,
                &config.collection,
                config.timeout(),
            )
            .await?;
            store.ensure_indexes().await?;

            tracing::info!(
                database = %config.database,
                collection = %config.collection,
                "Using MongoDB food store"
            );
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "mongodb_backend"))]
        StoreBackend::Mongodb => Err(StorageError::Unavailable {
            backend: "mongodb".to_string(),
        }
        .into()),
    }
}

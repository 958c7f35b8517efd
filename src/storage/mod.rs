//! Storage Module
//!
//! Persists the registry and the combination cache as two JSON records in a
//! string-keyed store. Loading never fails: missing or unreadable records
//! fall back to the seed registry and an empty cache. Saving is best-effort.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::engine::CombinationCache;
use crate::error::{StorageError, StorageResult};
use crate::item::Registry;

/// Record holding the discovered items.
pub const ELEMENTS_KEY: &str = "drug_craft_elements";
/// Record holding the combination cache.
pub const COMBINATIONS_KEY: &str = "drug_craft_combinations";

/// Opaque string key/value substrate.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch a record; `Ok(None)` when it was never written.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    async fn set(&self, key: &str, value: String) -> StorageResult<()>;
}

pub struct Persistence {
    store: Arc<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persistence over an in-process store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Load saved state, falling back to defaults per record.
    pub async fn load(&self) -> (Registry, CombinationCache) {
        let registry = match self.load_record::<Registry>(ELEMENTS_KEY).await {
            Ok(Some(mut registry)) => {
                registry.ensure_seeds();
                registry
            }
            Ok(None) => Registry::seeded(),
            Err(e) => {
                warn!("Error loading discovered items, starting from seeds: {}", e);
                Registry::seeded()
            }
        };

        let cache = match self.load_record::<CombinationCache>(COMBINATIONS_KEY).await {
            Ok(Some(cache)) => cache,
            Ok(None) => CombinationCache::new(),
            Err(e) => {
                warn!("Error loading combination cache, starting empty: {}", e);
                CombinationCache::new()
            }
        };

        debug!("Loaded {} items and {} cached combinations", registry.len(), cache.len());
        (registry, cache)
    }

    async fn load_record<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupted { key: key.to_string(), source })
    }

    async fn save_record<T: Serialize>(&self, key: &str, value: &T) -> StorageResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|source| StorageError::Encode { key: key.to_string(), source })?;
        self.store.set(key, json).await
    }

    /// Write both records, reporting the first failure.
    pub async fn try_save(&self, registry: &Registry, cache: &CombinationCache) -> StorageResult<()> {
        self.save_record(ELEMENTS_KEY, registry).await?;
        self.save_record(COMBINATIONS_KEY, cache).await
    }

    /// Write both records; failures are logged and otherwise ignored.
    pub async fn save(&self, registry: &Registry, cache: &CombinationCache) {
        if let Err(e) = self.try_save(registry, cache).await {
            warn!("Error saving game state: {}", e);
        }
    }

    /// Persist a seed-only registry next to the untouched cache and return it.
    pub async fn reset(&self, cache: &CombinationCache) -> Registry {
        let registry = Registry::seeded();
        self.save(&registry, cache).await;
        registry
    }
}

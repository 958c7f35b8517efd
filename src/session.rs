//! Game Session - owns the registry, the combination cache, the engine and
//! persistence, and runs a combination end to end.
//!
//! Concurrent combinations of the same pair are serialized: the first caller
//! resolves and caches, later callers wait and read the cached result.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::config::CraftConfig;
use crate::discovery::apply_result;
use crate::engine::{CombinationCache, CombinationEngine, Resolution, ResolutionSource};
use crate::error::{CraftError, CraftResult};
use crate::item::{canonical_key, CombinationKey, Item, Registry};
use crate::storage::{FileStore, KeyValueStore, MemoryStore, Persistence};

/// What the UI gets back from a combination.
#[derive(Debug, Clone, PartialEq)]
pub struct CombineOutcome {
    pub result: Item,
    pub is_new: bool,
    pub source: ResolutionSource,
}

pub struct GameSession {
    engine: CombinationEngine,
    persistence: Persistence,
    registry: RwLock<Registry>,
    cache: RwLock<CombinationCache>,
    in_flight: Mutex<HashMap<CombinationKey, Arc<Mutex<()>>>>,
}

impl GameSession {
    /// Open the session described by `config`, loading any saved state.
    pub async fn open(config: &CraftConfig) -> Self {
        let store: Arc<dyn KeyValueStore> = if config.ephemeral {
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(FileStore::new(config.data_dir.clone()))
        };
        Self::with_parts(config.build_engine(), Persistence::new(store)).await
    }

    pub async fn with_parts(engine: CombinationEngine, persistence: Persistence) -> Self {
        let (registry, cache) = persistence.load().await;
        Self {
            engine,
            persistence,
            registry: RwLock::new(registry),
            cache: RwLock::new(cache),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn engine(&self) -> &CombinationEngine {
        &self.engine
    }

    /// Combine two items, record the result and report whether it is new.
    pub async fn combine(&self, a: &Item, b: &Item) -> CombineOutcome {
        let key = canonical_key(a, b);

        let resolution = match self.cached(&key).await {
            Some(item) => Resolution { item, source: ResolutionSource::Cache },
            None => self.resolve_exclusive(key, a, b).await,
        };

        let discovery = {
            let mut registry = self.registry.write().await;
            apply_result(&mut registry, resolution.item)
        };

        if discovery.is_new || resolution.source.is_fresh() {
            self.persist().await;
        }

        CombineOutcome {
            result: discovery.item,
            is_new: discovery.is_new,
            source: resolution.source,
        }
    }

    /// Combine two registry items by id.
    pub async fn combine_ids(&self, a: &str, b: &str) -> CraftResult<CombineOutcome> {
        let (item_a, item_b) = {
            let registry = self.registry.read().await;
            let item_a = registry.get(a).cloned().ok_or_else(|| CraftError::UnknownItem(a.to_string()))?;
            let item_b = registry.get(b).cloned().ok_or_else(|| CraftError::UnknownItem(b.to_string()))?;
            (item_a, item_b)
        };
        Ok(self.combine(&item_a, &item_b).await)
    }

    async fn cached(&self, key: &CombinationKey) -> Option<Item> {
        self.cache.read().await.get(key).cloned()
    }

    async fn resolve_exclusive(&self, key: CombinationKey, a: &Item, b: &Item) -> Resolution {
        let gate = {
            let mut in_flight = self.in_flight.lock().await;
            in_flight.entry(key.clone()).or_default().clone()
        };

        let resolution = {
            let _guard = gate.lock().await;
            match self.cached(&key).await {
                Some(item) => {
                    debug!("Combination {} resolved by a concurrent request", key);
                    Resolution { item, source: ResolutionSource::Cache }
                }
                None => {
                    let fresh = self.engine.resolve_uncached(a, b).await;
                    let stored = self
                        .cache
                        .write()
                        .await
                        .insert_if_absent(key.clone(), fresh.item)
                        .clone();
                    Resolution { item: stored, source: fresh.source }
                }
            }
        };

        let mut in_flight = self.in_flight.lock().await;
        let holders = Arc::strong_count(&gate);
        drop(gate);
        // Map entry plus our handle: nobody else is waiting on this pair.
        if holders <= 2 {
            in_flight.remove(&key);
        }
        resolution
    }

    async fn persist(&self) {
        let registry = self.registry.read().await.clone();
        let cache = self.cache.read().await.clone();
        self.persistence.save(&registry, &cache).await;
    }

    /// Forget discoveries, keeping the seed items and every cached combination.
    pub async fn reset(&self) {
        let cache = self.cache.read().await.clone();
        let seeded = self.persistence.reset(&cache).await;
        *self.registry.write().await = seeded;
    }

    /// Whether the pair already has a cached result.
    pub async fn is_resolved(&self, a: &Item, b: &Item) -> bool {
        self.cache.read().await.contains(&canonical_key(a, b))
    }

    pub async fn item(&self, id: &str) -> Option<Item> {
        self.registry.read().await.get(id).cloned()
    }

    pub async fn items(&self) -> Vec<Item> {
        self.registry.read().await.items().to_vec()
    }

    pub async fn filter(&self, term: &str, category: Option<&str>) -> Vec<Item> {
        let registry = self.registry.read().await;
        registry.filter(term, category).into_iter().cloned().collect()
    }

    pub async fn categories(&self) -> Vec<String> {
        let registry = self.registry.read().await;
        registry.categories().into_iter().map(str::to_string).collect()
    }

    pub async fn registry_len(&self) -> usize {
        self.registry.read().await.len()
    }

    pub async fn cache_len(&self) -> usize {
        self.cache.read().await.len()
    }
}

//! Combination resolution: cache, static rule table, then generator with a
//! local archetype fallback. The engine never writes state; callers own the
//! cache and the registry.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use tracing::{debug, warn};

use super::cache::CombinationCache;
use super::category::derive_category;
use super::generator::{GeneratedItem, GenerationRequest, Generator};
use super::ids::{archetype_id, unique_id, TokenSource};
use super::rules::{lookup_rule, ARCHETYPES};
use crate::item::{canonical_key, Item};

pub const DEFAULT_CONTEXT: &str = "drug_craft";
pub const DEFAULT_GENERATOR_TIMEOUT: Duration = Duration::from_secs(10);

/// Which step of the chain produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionSource {
    Cache,
    StaticTable,
    Generated,
    Fallback,
}

impl ResolutionSource {
    /// Whether the result still has to be written into the cache.
    pub fn is_fresh(&self) -> bool {
        !matches!(self, ResolutionSource::Cache)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub item: Item,
    pub source: ResolutionSource,
}

pub struct CombinationEngine {
    generator: Option<Arc<dyn Generator>>,
    timeout: Duration,
    context: String,
    rng: Mutex<Box<dyn RngCore + Send>>,
    tokens: TokenSource,
}

impl CombinationEngine {
    /// Engine without a generator; unknown pairs go straight to the archetype fallback.
    pub fn new() -> Self {
        Self {
            generator: None,
            timeout: DEFAULT_GENERATOR_TIMEOUT,
            context: DEFAULT_CONTEXT.to_string(),
            rng: Mutex::new(Box::new(StdRng::from_entropy())),
            tokens: TokenSource::new(),
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Replace the randomness used by the archetype fallback.
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Mutex::new(Box::new(rng));
        self
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// Resolve a pair. Always produces an item.
    pub async fn resolve(&self, cache: &CombinationCache, a: &Item, b: &Item) -> Resolution {
        let key = canonical_key(a, b);
        if let Some(hit) = cache.get(&key) {
            debug!("Combination cache hit for {}", key);
            return Resolution {
                item: hit.clone(),
                source: ResolutionSource::Cache,
            };
        }
        self.resolve_uncached(a, b).await
    }

    /// Resolve a pair known to be missing from the cache.
    pub async fn resolve_uncached(&self, a: &Item, b: &Item) -> Resolution {
        // Same ordering as the cache key, so ids, descriptions and requests
        // never depend on which item was picked first.
        let (a, b) = if a.id <= b.id { (a, b) } else { (b, a) };

        if let Some(rule) = lookup_rule(&a.id, &b.id) {
            debug!("Static rule '{}' matched {} + {}", rule.pair, a.id, b.id);
            return Resolution {
                item: rule.item(),
                source: ResolutionSource::StaticTable,
            };
        }

        match self.generate(a, b).await {
            Ok(item) => Resolution {
                item,
                source: ResolutionSource::Generated,
            },
            Err(e) => {
                warn!("Generator unavailable for {} + {}, using local fallback: {:#}", a.id, b.id, e);
                Resolution {
                    item: self.creative_fallback(a, b),
                    source: ResolutionSource::Fallback,
                }
            }
        }
    }

    async fn generate(&self, a: &Item, b: &Item) -> Result<Item> {
        let Some(generator) = &self.generator else {
            bail!("no generator configured");
        };

        let request = GenerationRequest {
            item_a: a.clone(),
            item_b: b.clone(),
            context: self.context.clone(),
        };

        let generated = tokio::time::timeout(self.timeout, generator.generate(&request))
            .await
            .with_context(|| format!("generator timed out after {:?}", self.timeout))??;

        self.normalize(a, b, generated)
    }

    /// Turn a raw generator answer into an item, deriving a missing id or category.
    pub fn normalize(&self, a: &Item, b: &Item, generated: GeneratedItem) -> Result<Item> {
        let name = non_blank(generated.name).context("generator response has no name")?;
        let icon = non_blank(generated.icon).context("generator response has no icon")?;

        let id = non_blank(generated.id)
            .unwrap_or_else(|| unique_id(a, b, &self.tokens.next_token()));
        let category = non_blank(generated.category).unwrap_or_else(|| derive_category(a, b));

        Ok(Item {
            id,
            name,
            icon,
            category,
            description: non_blank(generated.description),
        })
    }

    /// Synthesize an item from a randomly chosen archetype.
    pub fn creative_fallback(&self, a: &Item, b: &Item) -> Item {
        let archetype = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            *ARCHETYPES.choose(&mut **rng).unwrap_or(&ARCHETYPES[0])
        };

        Item {
            id: archetype_id(a, b, &archetype, &self.tokens.next_token()),
            name: archetype.name.to_string(),
            icon: archetype.icon.to_string(),
            category: archetype.category.to_string(),
            description: Some(format!("A combination of {} and {}", a.name, b.name)),
        }
    }
}

impl Default for CombinationEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

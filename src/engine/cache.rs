//! Combination Cache
//!
//! Memoizes resolved pairs by canonical key. Entries are write-once: the
//! first result stored for a key is kept for the life of the save.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::item::{CombinationKey, Item};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombinationCache {
    entries: HashMap<CombinationKey, Item>,
}

impl CombinationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CombinationKey) -> Option<&Item> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &CombinationKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Store `item` under `key` unless an entry exists. Returns the entry now
    /// held for the key.
    pub fn insert_if_absent(&mut self, key: CombinationKey, item: Item) -> &Item {
        self.entries.entry(key).or_insert(item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CombinationKey, &Item)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_get_set() {
        let mut cache = CombinationCache::new();
        let key = CombinationKey::from_ids("plant", "plant");
        let weed = Item::new("weed", "Weed", "🥬", "natural");

        cache.insert_if_absent(key.clone(), weed.clone());

        assert_eq!(cache.get(&key), Some(&weed));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_never_overwrites() {
        let mut cache = CombinationCache::new();
        let key = CombinationKey::from_ids("plant", "container");
        let first = Item::new("stash", "Plant Stash", "🧺", "equipment");
        let second = Item::new("hash", "Hash", "🟤", "cannabis");

        cache.insert_if_absent(key.clone(), first.clone());
        let held = cache.insert_if_absent(key.clone(), second).clone();

        assert_eq!(held, first);
        assert_eq!(cache.get(&key), Some(&first));
    }

    #[test]
    fn test_cache_miss_different_pair() {
        let mut cache = CombinationCache::new();
        cache.insert_if_absent(
            CombinationKey::from_ids("a", "b"),
            Item::new("ab", "AB", "?", "x"),
        );
        assert!(cache.get(&CombinationKey::from_ids("a", "c")).is_none());
    }

    #[test]
    fn test_serializes_as_object_keyed_by_pair() {
        let mut cache = CombinationCache::new();
        cache.insert_if_absent(
            CombinationKey::from_ids("plant", "chemical"),
            Item::new("cocaine", "Cocaine", "❄️", "drug"),
        );
        let json = serde_json::to_value(&cache).unwrap();
        assert_eq!(json["chemical+plant"]["id"], "cocaine");
    }
}

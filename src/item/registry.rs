//! Item registry: insertion-ordered set of items, unique by id.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{category, Item};

/// The four building blocks every game starts with.
pub fn seed_items() -> Vec<Item> {
    vec![
        Item::new("plant", "Plant", "🌿", category::NATURAL),
        Item::new("chemical", "Chemical", "⚗️", category::SYNTHETIC),
        Item::new("method", "Method", "🧪", category::PROCESS),
        Item::new("container", "Container", "📦", category::EQUIPMENT),
    ]
}

/// Known items in discovery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Item>", into = "Vec<Item>")]
pub struct Registry {
    items: Vec<Item>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Registry holding only the seed items.
    pub fn seeded() -> Self {
        Self::from_items(seed_items())
    }

    /// Build from a list, keeping the first occurrence of each id.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut registry = Self::new();
        for item in items {
            registry.insert(item);
        }
        registry
    }

    /// Put back any seed item that is missing, ahead of everything else.
    pub fn ensure_seeds(&mut self) {
        let missing: Vec<Item> = seed_items()
            .into_iter()
            .filter(|seed| !self.contains(&seed.id))
            .collect();
        if missing.is_empty() {
            return;
        }
        let rest = std::mem::take(&mut self.items);
        *self = Self::from_items(missing.into_iter().chain(rest));
    }

    /// Append `item` unless its id is already known. Returns whether it was added.
    pub fn insert(&mut self, item: Item) -> bool {
        if self.index.contains_key(&item.id) {
            return false;
        }
        self.index.insert(item.id.clone(), self.items.len());
        self.items.push(item);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Items whose name contains `term` (case-insensitive) and whose category
    /// matches `category`. `None` or `"all"` matches every category.
    pub fn filter(&self, term: &str, category: Option<&str>) -> Vec<&Item> {
        let term = term.trim().to_lowercase();
        let category = category.filter(|c| *c != category::ALL);
        self.items
            .iter()
            .filter(|item| term.is_empty() || item.name.to_lowercase().contains(&term))
            .filter(|item| category.map_or(true, |c| item.category == c))
            .collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !item.category.is_empty() && !seen.contains(&item.category.as_str()) {
                seen.push(&item.category);
            }
        }
        seen
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::seeded()
    }
}

impl From<Vec<Item>> for Registry {
    fn from(items: Vec<Item>) -> Self {
        Self::from_items(items)
    }
}

impl From<Registry> for Vec<Item> {
    fn from(registry: Registry) -> Self {
        registry.items
    }
}

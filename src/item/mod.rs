//! Item Module
//!
//! Discoverable items, the canonical pair key and the registry of
//! everything the player has found so far.

mod key;
mod registry;

pub use key::{canonical_key, CombinationKey};
pub use registry::{seed_items, Registry};

use serde::{Deserialize, Serialize};

/// Well-known category tags.
pub mod category {
    pub const NATURAL: &str = "natural";
    pub const SYNTHETIC: &str = "synthetic";
    pub const PROCESS: &str = "process";
    pub const EQUIPMENT: &str = "equipment";
    pub const DRUG: &str = "drug";
    pub const MISCELLANEOUS: &str = "miscellaneous";
    /// Pseudo-category used by filters to match every item.
    pub const ALL: &str = "all";
}

/// A discoverable item. Identity is carried by `id` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            category: category.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether both values denote the same item, ignoring display fields.
    pub fn same_item(&self, other: &Item) -> bool {
        self.id == other.id
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.icon, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_item_ignores_display_fields() {
        let a = Item::new("weed", "Weed", "🥬", category::NATURAL);
        let b = Item::new("weed", "Green", "🌱", category::DRUG);
        assert!(a.same_item(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_description_omitted_when_absent() {
        let item = Item::new("lab", "Lab Process", "🔬", category::PROCESS);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("description").is_none());

        let described = item.with_description("A combination of Method and Chemical");
        let json = serde_json::to_value(&described).unwrap();
        assert_eq!(json["description"], "A combination of Method and Chemical");
    }

    #[test]
    fn test_deserialize_without_description() {
        let item: Item = serde_json::from_str(
            r#"{"id":"meth","name":"Meth","icon":"💎","category":"synthetic"}"#,
        )
        .unwrap();
        assert_eq!(item.description, None);
        assert_eq!(item.to_string(), "💎 Meth");
    }
}

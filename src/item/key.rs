//! Order-independent pair keys.

use serde::{Deserialize, Serialize};

use super::Item;

/// Separator between the two ids of a key.
pub const KEY_SEPARATOR: char = '+';

/// Canonical key of an unordered item pair, e.g. `chemical+plant`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombinationKey(String);

impl CombinationKey {
    /// Build the key from two ids, sorted ascending.
    pub fn from_ids(a: &str, b: &str) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self(format!("{first}{KEY_SEPARATOR}{second}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CombinationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key under which the result of combining `a` and `b` is cached.
pub fn canonical_key(a: &Item, b: &Item) -> CombinationKey {
    CombinationKey::from_ids(&a.id, &b.id)
}

//! Discovery tracking: merges a resolved item into the registry.

use tracing::info;

use crate::item::{Item, Registry};

#[derive(Debug, Clone, PartialEq)]
pub struct Discovery {
    pub item: Item,
    /// True when the item's id was not in the registry before.
    pub is_new: bool,
}

/// Add `result` to `registry` if its id is unknown.
pub fn apply_result(registry: &mut Registry, result: Item) -> Discovery {
    let is_new = registry.insert(result.clone());
    if is_new {
        info!("New discovery: {} ({})", result.name, result.id);
    }
    Discovery { item: result, is_new }
}

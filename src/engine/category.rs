//! Category inheritance for generated items that arrive without one.

use crate::item::category::{DRUG, MISCELLANEOUS, NATURAL, PROCESS, SYNTHETIC};
use crate::item::Item;

/// Derive a result category from its parents. First matching rule wins:
/// shared category, then `synthetic` dominance, then natural + process
/// making a drug, then `miscellaneous`.
pub fn derive_category(a: &Item, b: &Item) -> String {
    let (ca, cb) = (a.category.as_str(), b.category.as_str());

    if ca == cb {
        return ca.to_string();
    }
    if ca == SYNTHETIC || cb == SYNTHETIC {
        return SYNTHETIC.to_string();
    }
    if matches!((ca, cb), (NATURAL, PROCESS) | (PROCESS, NATURAL)) {
        return DRUG.to_string();
    }
    MISCELLANEOUS.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent(category: &str) -> Item {
        Item::new(format!("{category}-parent"), "Parent", "?", category)
    }

    fn derived(a: &str, b: &str) -> String {
        derive_category(&parent(a), &parent(b))
    }

    #[test]
    fn test_shared_category_is_inherited() {
        assert_eq!(derived("equipment", "equipment"), "equipment");
        assert_eq!(derived("synthetic", "synthetic"), "synthetic");
    }

    #[test]
    fn test_synthetic_dominates() {
        assert_eq!(derived("synthetic", "natural"), "synthetic");
        assert_eq!(derived("process", "synthetic"), "synthetic");
    }

    #[test]
    fn test_natural_and_process_make_drug() {
        assert_eq!(derived("natural", "process"), "drug");
        assert_eq!(derived("process", "natural"), "drug");
    }

    #[test]
    fn test_everything_else_is_miscellaneous() {
        assert_eq!(derived("drug", "consumption"), "miscellaneous");
        assert_eq!(derived("natural", "equipment"), "miscellaneous");
    }
}

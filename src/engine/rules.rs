//! Static rule table and creative-fallback archetypes.
//!
//! Rule keys are written in a declared order (`plant+chemical`), not in
//! canonical order, so lookups try both orientations.

use std::collections::HashMap;

use crate::item::{category, Item};

/// A predetermined combination result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub pair: &'static str,
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub category: &'static str,
}

impl Rule {
    pub fn item(&self) -> Item {
        Item::new(self.id, self.name, self.icon, self.category)
    }
}

/// Template used when nothing else can produce a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Archetype {
    pub name: &'static str,
    pub icon: &'static str,
    pub category: &'static str,
}

impl Archetype {
    /// Lowercase name with whitespace replaced by `_`.
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
    }
}

pub const RULES: &[Rule] = &[
    Rule { pair: "plant+plant", id: "weed", name: "Weed", icon: "🥬", category: category::NATURAL },
    Rule { pair: "plant+chemical", id: "cocaine", name: "Cocaine", icon: "❄️", category: category::DRUG },
    Rule { pair: "plant+method", id: "extract", name: "Plant Extract", icon: "💧", category: category::PROCESS },
    Rule { pair: "plant+container", id: "stash", name: "Plant Stash", icon: "🧺", category: category::EQUIPMENT },
    Rule { pair: "chemical+chemical", id: "meth", name: "Meth", icon: "💎", category: category::SYNTHETIC },
    Rule { pair: "method+chemical", id: "lab", name: "Lab Process", icon: "🔬", category: category::PROCESS },
    Rule { pair: "weed+method", id: "joint", name: "Joint", icon: "🚬", category: "consumption" },
    Rule { pair: "cocaine+method", id: "powder", name: "White Powder", icon: "🤧", category: category::DRUG },
];

pub const ARCHETYPES: &[Archetype] = &[
    Archetype { name: "Heroin", icon: "💉", category: "opioid" },
    Archetype { name: "LSD", icon: "🧠", category: "psychedelic" },
    Archetype { name: "MDMA", icon: "💊", category: "stimulant" },
    Archetype { name: "DMT", icon: "👁️", category: "psychedelic" },
    Archetype { name: "Mushrooms", icon: "🍄", category: category::NATURAL },
    Archetype { name: "Prescription Pills", icon: "💊", category: "pharmaceutical" },
    Archetype { name: "Amphetamine", icon: "⚡", category: "stimulant" },
    Archetype { name: "Opium", icon: "🌺", category: "opioid" },
    Archetype { name: "Hash", icon: "🟤", category: "cannabis" },
    Archetype { name: "Ketamine", icon: "🐴", category: "dissociative" },
];

lazy_static::lazy_static! {
    /// Rules indexed by their declared pair string.
    static ref RULE_TABLE: HashMap<&'static str, &'static Rule> =
        RULES.iter().map(|rule| (rule.pair, rule)).collect();
}

/// Look up a predetermined result, forward (`a+b`) first, then reverse.
pub fn lookup_rule(a: &str, b: &str) -> Option<&'static Rule> {
    RULE_TABLE
        .get(format!("{a}+{b}").as_str())
        .or_else(|| RULE_TABLE.get(format!("{b}+{a}").as_str()))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_both_orientations() {
        assert_eq!(lookup_rule("plant", "chemical").unwrap().id, "cocaine");
        assert_eq!(lookup_rule("chemical", "plant").unwrap().id, "cocaine");
        assert_eq!(lookup_rule("method", "weed").unwrap().id, "joint");
        assert_eq!(lookup_rule("chemical", "method").unwrap().id, "lab");
    }

    #[test]
    fn test_lookup_miss() {
        assert!(lookup_rule("container", "container").is_none());
        assert!(lookup_rule("plant", "unicorn").is_none());
    }

    #[test]
    fn test_rule_pairs_are_unique() {
        assert_eq!(RULE_TABLE.len(), RULES.len());
    }

    #[test]
    fn test_rule_item() {
        let item = lookup_rule("plant", "chemical").unwrap().item();
        assert_eq!(item, Item::new("cocaine", "Cocaine", "❄️", "drug"));
    }

    #[test]
    fn test_archetype_slug() {
        assert_eq!(ARCHETYPES[5].slug(), "prescription_pills");
        assert_eq!(ARCHETYPES[1].slug(), "lsd");
    }
}

//! Drug Craft
//!
//! Combination and discovery engine for an alchemy-style crafting game:
//! - Order-independent pair keys and a write-once combination cache
//! - Static rule table, pluggable generators and a local archetype fallback
//! - Discovery tracking over an insertion-ordered item registry
//! - Best-effort JSON persistence with corruption recovery

pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod item;
pub mod session;
pub mod storage;

// Re-exports for convenience
pub use config::CraftConfig;
pub use engine::{CombinationEngine, Generator, ResolutionSource};
pub use error::{CraftError, CraftResult};
pub use item::{canonical_key, Item, Registry};
pub use session::{CombineOutcome, GameSession};

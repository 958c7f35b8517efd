//! Engine Module
//!
//! Resolves item pairs into results through the cache, the static rule
//! table and a generator chain that always ends in a local fallback.

mod cache;
mod category;
mod generator;
mod ids;
mod resolver;
pub mod rules;

pub use cache::CombinationCache;
pub use category::derive_category;
pub use generator::{parse_generated, GeneratedItem, GenerationRequest, Generator, HttpGenerator, OllamaGenerator};
pub use ids::TokenSource;
pub use resolver::{CombinationEngine, Resolution, ResolutionSource, DEFAULT_CONTEXT, DEFAULT_GENERATOR_TIMEOUT};

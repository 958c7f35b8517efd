//! Id derivation for generated results.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use super::rules::Archetype;
use crate::item::Item;

/// Hands out base-36 timestamp tokens that strictly increase within the process.
#[derive(Debug, Default)]
pub struct TokenSource {
    last: AtomicU64,
}

impl TokenSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_token(&self) -> String {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return to_base36(candidate),
                Err(actual) => prev = actual,
            }
        }
    }
}

pub fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// `{a}_{b}_{token}`, used when a generator omits the id.
pub fn unique_id(a: &Item, b: &Item, token: &str) -> String {
    format!("{}_{}_{}", a.id, b.id, token)
}

/// `{a}_{b}_{archetype}_{token}`, used by the creative fallback.
pub fn archetype_id(a: &Item, b: &Item, archetype: &Archetype, token: &str) -> String {
    format!("{}_{}_{}_{}", a.id, b.id, archetype.slug(), token)
}

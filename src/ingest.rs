//! Pool list parsing.
//!
//! Reads pasted `<quantity> <card name>` lines and resolves them against the
//! rankings catalog. Lines that don't follow the format are dropped silently.

use regex::Regex;
use tracing::{debug, info};

use crate::catalog::RankingsCatalog;
use crate::models::{NotFound, PoolEntry, ResolvedPool};

/// Parse raw pool text into `(quantity, name)` pairs, in line order.
///
/// The quantity must be a positive integer at the very start of the line.
/// Names are trimmed; a line whose name is blank after trimming is dropped.
pub fn parse_pool_text(text: &str) -> Vec<(u32, String)> {
    let re_line = Regex::new(r"^(\d+)\s+(.+)$").unwrap();
    let mut entries = Vec::new();

    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let Some(caps) = re_line.captures(line) else {
            debug!("Ignoring pool line: {:?}", line);
            continue;
        };

        let quantity: u32 = match caps[1].parse() {
            Ok(q) if q > 0 => q,
            _ => continue,
        };
        let name = caps[2].trim();
        if name.is_empty() {
            continue;
        }

        entries.push((quantity, name.to_string()));
    }

    entries
}

/// Parse `text` and resolve every entry against `catalog`.
///
/// Unknown names are collected in `not_found` with their quantity; the rest of
/// the pool is still resolved.
pub fn resolve_pool(catalog: &RankingsCatalog, text: &str) -> ResolvedPool {
    let mut pool = ResolvedPool::default();

    for (quantity, name) in parse_pool_text(text) {
        match catalog.lookup(&name) {
            Some(card) => pool.entries.push(PoolEntry {
                quantity,
                card: card.clone(),
            }),
            None => pool.not_found.push(NotFound { quantity, name }),
        }
    }

    info!(
        "Resolved {} cards ({} entries), {} not found",
        pool.card_count(),
        pool.entries.len(),
        pool.not_found.len()
    );
    pool
}

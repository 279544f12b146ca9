//! Resolved pool entries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use super::CardRecord;

/// One physical card in the pool.
///
/// Copies of the same entry share one immutable record; everything that
/// depends on an archetype lives in [`super::RatedCard`], never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolCard(Arc<CardRecord>);

impl PoolCard {
    pub fn new(record: Arc<CardRecord>) -> Self {
        Self(record)
    }

    pub fn record(&self) -> &Arc<CardRecord> {
        &self.0
    }
}

impl Deref for PoolCard {
    type Target = CardRecord;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<CardRecord> for PoolCard {
    fn from(record: CardRecord) -> Self {
        Self(Arc::new(record))
    }
}

/// A resolved `<quantity> <name>` line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolEntry {
    pub quantity: u32,
    pub card: Arc<CardRecord>,
}

impl PoolEntry {
    /// Expand into `quantity` pool cards.
    pub fn expand(&self) -> impl Iterator<Item = PoolCard> + '_ {
        (0..self.quantity).map(|_| PoolCard::new(Arc::clone(&self.card)))
    }
}

/// A requested card the rankings table does not know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotFound {
    pub quantity: u32,
    pub name: String,
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.name)
    }
}

/// The outcome of reading a pool list against the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPool {
    pub entries: Vec<PoolEntry>,
    pub not_found: Vec<NotFound>,
}

impl ResolvedPool {
    /// All pool cards with duplicates expanded, in list order.
    pub fn cards(&self) -> Vec<PoolCard> {
        self.entries.iter().flat_map(PoolEntry::expand).collect()
    }

    /// Total number of resolved cards.
    pub fn card_count(&self) -> u32 {
        self.entries.iter().map(|e| e.quantity).sum()
    }
}

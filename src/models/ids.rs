//! Deterministic pool fingerprints using SHA256 hashing.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use super::ResolvedPool;

/// Content-derived identifier for a pool list.
///
/// Two lists naming the same cards in the same quantities get the same ID,
/// whatever their line order.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolId(String);

impl PoolId {
    /// Hash the given fields, keeping the first 16 hex characters.
    pub fn generate(fields: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                hasher.update(b"|");
            }
            hasher.update(field.as_bytes());
        }
        let hash = hex::encode(hasher.finalize());
        Self(hash[..16].to_string())
    }

    /// Fingerprint a resolved pool, unknown cards included.
    pub fn for_pool(pool: &ResolvedPool) -> Self {
        let mut fields: Vec<String> = pool
            .entries
            .iter()
            .map(|e| format!("{}x{}", e.quantity, e.card.name.to_lowercase()))
            .chain(
                pool.not_found
                    .iter()
                    .map(|n| format!("{}x?{}", n.quantity, n.name.to_lowercase())),
            )
            .collect();
        fields.sort();

        let refs: Vec<&str> = fields.iter().map(String::as_str).collect();
        Self::generate(&refs)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PoolId({})", self.0)
    }
}

//! Rankings catalog.
//!
//! The catalog is the read-only table of graded cards every pool is resolved
//! against. It is loaded once (from the embedded table or a JSON file) and
//! shared behind an `Arc` afterwards.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::CardRecord;

/// Rankings table shipped with the crate.
const EMBEDDED_RANKINGS: &str = include_str!("../../data/rankings.json");

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Static lookup table of card records, in source order.
#[derive(Debug, Clone, Default)]
pub struct RankingsCatalog {
    cards: Vec<Arc<CardRecord>>,
}

impl RankingsCatalog {
    /// A catalog with no cards. Every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(cards: Vec<CardRecord>) -> Self {
        Self {
            cards: cards.into_iter().map(Arc::new).collect(),
        }
    }

    /// Parse a JSON array of card records.
    ///
    /// Entries that fail to parse (unknown grade, missing name) are skipped
    /// with a warning; only a malformed top-level document is an error.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
        let total = values.len();
        let mut cards = Vec::with_capacity(total);

        for (i, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<CardRecord>(value) {
                Ok(card) => cards.push(card),
                Err(e) => warn!("Skipping rankings entry {}: {}", i, e),
            }
        }

        debug!("Parsed {} of {} rankings entries", cards.len(), total);
        Ok(Self::new(cards))
    }

    /// Load a JSON rankings file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&contents)?;
        info!("Loaded {} cards from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    /// The rankings table compiled into the binary.
    pub fn embedded() -> Self {
        match Self::from_json(EMBEDDED_RANKINGS) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("Embedded rankings unreadable, using empty catalog: {}", e);
                Self::empty()
            }
        }
    }

    /// Load from `path` if given, otherwise the embedded table.
    ///
    /// A file that cannot be loaded falls back to the embedded table so a bad
    /// path never prevents analysis.
    pub fn load_or_embedded(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::from_file(path).unwrap_or_else(|e| {
                warn!("Failed to load rankings from {:?}: {}", path, e);
                Self::embedded()
            }),
            None => Self::embedded(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Arc<CardRecord>] {
        &self.cards
    }

    /// Resolve a card name.
    ///
    /// Case-insensitive exact match first. Failing that, the first card in
    /// catalog order whose name contains the query or is contained in it.
    /// Substring matches are not ranked, so short queries can hit an
    /// unexpected card.
    pub fn lookup(&self, name: &str) -> Option<&Arc<CardRecord>> {
        let query = name.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        self.cards
            .iter()
            .find(|c| c.name.to_lowercase() == query)
            .or_else(|| {
                self.cards.iter().find(|c| {
                    let card_name = c.name.to_lowercase();
                    card_name.contains(&query) || query.contains(&card_name)
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColorPair, Grade};
    use std::io::Write;

    fn catalog() -> RankingsCatalog {
        RankingsCatalog::new(vec![
            CardRecord::new("Bold Wolf", Grade::B, "1G".parse().ok(), "Creature — Wolf"),
            CardRecord::new("Wolf", Grade::C, "G".parse().ok(), "Creature — Wolf"),
            CardRecord::new("Azure Drake", Grade::BMinus, "2UR".parse().ok(), "Creature"),
        ])
    }

    #[test]
    fn test_lookup_exact_case_insensitive() {
        let catalog = catalog();
        assert_eq!(catalog.lookup("bold wolf").unwrap().name, "Bold Wolf");
        assert_eq!(catalog.lookup("AZURE DRAKE").unwrap().name, "Azure Drake");
    }

    #[test]
    fn test_lookup_exact_beats_earlier_substring() {
        // "Bold Wolf" contains "wolf" and comes first, but "Wolf" is exact.
        assert_eq!(catalog().lookup("Wolf").unwrap().name, "Wolf");
    }

    #[test]
    fn test_lookup_substring_either_direction() {
        let catalog = catalog();
        assert_eq!(catalog.lookup("Azure").unwrap().name, "Azure Drake");
        assert_eq!(
            catalog.lookup("Azure Drake (foil)").unwrap().name,
            "Azure Drake"
        );
    }

    #[test]
    fn test_lookup_substring_takes_catalog_order() {
        assert_eq!(catalog().lookup("olf").unwrap().name, "Bold Wolf");
    }

    #[test]
    fn test_lookup_miss() {
        assert!(catalog().lookup("Nonexistent Card").is_none());
        assert!(catalog().lookup("   ").is_none());
        assert!(RankingsCatalog::empty().lookup("Bold Wolf").is_none());
    }

    #[test]
    fn test_from_json_skips_invalid_entries() {
        let json = r#"[
            {"name": "Bold Wolf", "grade": "B", "cmc": "1G", "type": "Creature"},
            {"name": "Broken", "grade": "Q"},
            {"name": "Misty Grove", "grade": "C", "type": "Land"}
        ]"#;
        let catalog = RankingsCatalog::from_json(json).unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.lookup("Broken").is_none());
        assert!(catalog.lookup("Misty Grove").is_some());
    }

    #[test]
    fn test_from_json_keeps_unknown_cost_symbols() {
        let json = r#"[
            {"name": "Colorless Golem", "grade": "B", "cmc": "2C", "type": "Artifact Creature"}
        ]"#;
        let catalog = RankingsCatalog::from_json(json).unwrap();

        let golem = catalog.lookup("Colorless Golem").unwrap();
        assert!(golem.cost.as_ref().unwrap().has_other_symbols());
        assert!(ColorPair::ALL
            .iter()
            .all(|p| !crate::models::fits(golem.cost.as_ref(), *p)));
    }

    #[test]
    fn test_from_json_rejects_non_array() {
        assert!(RankingsCatalog::from_json(r#"{"name": "x"}"#).is_err());
        assert!(RankingsCatalog::from_json("not json").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Bold Wolf", "grade": "B", "cmc": "1G", "type": "Creature"}}]"#
        )
        .unwrap();

        let catalog = RankingsCatalog::from_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_load_or_embedded_falls_back() {
        let catalog =
            RankingsCatalog::load_or_embedded(Some(Path::new("/definitely/missing.json")));
        assert_eq!(catalog.len(), RankingsCatalog::embedded().len());
    }

    #[test]
    fn test_embedded_table_loads_completely() {
        let raw: Vec<serde_json::Value> = serde_json::from_str(EMBEDDED_RANKINGS).unwrap();
        let catalog = RankingsCatalog::embedded();

        assert!(!catalog.is_empty());
        assert_eq!(catalog.len(), raw.len());
    }
}

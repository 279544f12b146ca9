//! Card records from the rankings table.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

use super::{ColorPair, ColorSet, Grade, ManaCost};

/// Archetype affinity parsed from a free-text field.
///
/// The text is either the literal token `all` or any text in which pair codes
/// appear as case-insensitive substrings ("WU, UB", "best in wu/ub").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Affinity {
    raw: Option<String>,
    pub all: bool,
    pub pairs: BTreeSet<ColorPair>,
}

impl Affinity {
    pub fn parse(text: Option<&str>) -> Self {
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return Self::default();
        };

        let lower = text.to_lowercase();
        let pairs = ColorPair::ALL
            .into_iter()
            .filter(|p| lower.contains(&p.code().to_lowercase()))
            .collect();

        Self {
            raw: Some(text.to_string()),
            all: lower == "all",
            pairs,
        }
    }

    /// Text names the pair.
    pub fn lists(&self, pair: ColorPair) -> bool {
        self.pairs.contains(&pair)
    }

    /// Text is `all` or names the pair.
    pub fn covers(&self, pair: ColorPair) -> bool {
        self.all || self.lists(pair)
    }

    pub fn as_text(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

/// A rankings table entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCardRecord", into = "RawCardRecord")]
pub struct CardRecord {
    pub name: String,
    pub grade: Grade,
    /// `None` for lands and cards with no printed cost.
    pub cost: Option<ManaCost>,
    pub card_type: String,
    pub best_in: Affinity,
    pub good_in: Affinity,
    pub poor_in: Affinity,
    pub thoughts: Option<String>,
}

impl CardRecord {
    /// Create a record with no affinities or notes.
    pub fn new(name: &str, grade: Grade, cost: Option<ManaCost>, card_type: &str) -> Self {
        Self {
            name: name.to_string(),
            grade,
            cost,
            card_type: card_type.to_string(),
            best_in: Affinity::default(),
            good_in: Affinity::default(),
            poor_in: Affinity::default(),
            thoughts: None,
        }
    }

    /// Builder method to set the best-in text.
    pub fn with_best_in(mut self, text: &str) -> Self {
        self.best_in = Affinity::parse(Some(text));
        self
    }

    /// Builder method to set the good-in text.
    pub fn with_good_in(mut self, text: &str) -> Self {
        self.good_in = Affinity::parse(Some(text));
        self
    }

    /// Builder method to set the poor-in text.
    pub fn with_poor_in(mut self, text: &str) -> Self {
        self.poor_in = Affinity::parse(Some(text));
        self
    }

    /// Builder method to set reviewer notes.
    pub fn with_thoughts(mut self, text: &str) -> Self {
        self.thoughts = Some(text.to_string());
        self
    }

    /// Case-insensitive substring test on the type line.
    pub fn type_contains(&self, needle: &str) -> bool {
        self.card_type.to_lowercase().contains(needle)
    }

    pub fn is_creature(&self) -> bool {
        self.type_contains("creature")
    }

    /// Lands have no cost and a type line mentioning "land".
    pub fn is_land(&self) -> bool {
        self.cost.is_none() && self.type_contains("land")
    }

    pub fn colors(&self) -> ColorSet {
        self.cost.as_ref().map(ManaCost::colors).unwrap_or_default()
    }
}

/// Wire shape of a rankings entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCardRecord {
    name: String,
    grade: String,
    #[serde(default, deserialize_with = "string_or_number")]
    cmc: Option<String>,
    #[serde(rename = "type", default)]
    card_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    best_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    good_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    poor_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thoughts: Option<String>,
}

/// Some exports write purely generic costs as bare numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Number(u64),
    }

    Ok(Option::<Loose>::deserialize(deserializer)?.map(|v| match v {
        Loose::Text(s) => s,
        Loose::Number(n) => n.to_string(),
    }))
}

impl TryFrom<RawCardRecord> for CardRecord {
    type Error = String;

    fn try_from(raw: RawCardRecord) -> Result<Self, Self::Error> {
        let grade: Grade = raw
            .grade
            .parse()
            .map_err(|e| format!("{}: {}", raw.name, e))?;
        let cost = raw.cmc.as_deref().and_then(ManaCost::parse);

        Ok(Self {
            name: raw.name,
            grade,
            cost,
            card_type: raw.card_type.unwrap_or_default(),
            best_in: Affinity::parse(raw.best_in.as_deref()),
            good_in: Affinity::parse(raw.good_in.as_deref()),
            poor_in: Affinity::parse(raw.poor_in.as_deref()),
            thoughts: raw.thoughts,
        })
    }
}

impl From<CardRecord> for RawCardRecord {
    fn from(card: CardRecord) -> Self {
        Self {
            name: card.name,
            grade: card.grade.label().to_string(),
            cmc: card.cost.map(String::from),
            card_type: Some(card.card_type),
            best_in: card.best_in.raw,
            good_in: card.good_in.raw,
            poor_in: card.poor_in.raw,
            thoughts: card.thoughts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affinity_all_token() {
        let a = Affinity::parse(Some("All"));
        assert!(a.all);
        assert!(a.covers(ColorPair::RG));
        assert!(!a.lists(ColorPair::RG));
    }

    #[test]
    fn test_affinity_substring_codes() {
        let a = Affinity::parse(Some("wu, UB"));
        assert!(!a.all);
        assert!(a.lists(ColorPair::WU));
        assert!(a.lists(ColorPair::UB));
        assert!(!a.lists(ColorPair::UG));
    }

    #[test]
    fn test_affinity_matches_literal_substrings_only() {
        // "UW" does not contain "wu", but "WUB" contains both "wu" and "ub".
        let a = Affinity::parse(Some("UW"));
        assert!(!a.lists(ColorPair::WU));

        let a = Affinity::parse(Some("WUB"));
        assert!(a.lists(ColorPair::WU));
        assert!(a.lists(ColorPair::UB));
    }

    #[test]
    fn test_affinity_empty() {
        let a = Affinity::parse(None);
        assert!(!a.all);
        assert!(a.pairs.is_empty());
        assert_eq!(Affinity::parse(Some("")), Affinity::default());
    }

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "name": "Azure Drake",
            "grade": "B-",
            "cmc": "2UR",
            "type": "Creature — Drake",
            "goodIn": "UR",
            "thoughts": "Solid flyer"
        }"#;
        let card: CardRecord = serde_json::from_str(json).unwrap();

        assert_eq!(card.name, "Azure Drake");
        assert_eq!(card.grade, Grade::BMinus);
        assert_eq!(card.cost.as_ref().unwrap().total(), 4);
        assert!(card.is_creature());
        assert!(card.good_in.lists(ColorPair::UR));
        assert_eq!(card.thoughts.as_deref(), Some("Solid flyer"));
    }

    #[test]
    fn test_deserialize_land_without_cost() {
        let json = r#"{"name": "Misty Grove", "grade": "C", "type": "Land — Town"}"#;
        let card: CardRecord = serde_json::from_str(json).unwrap();

        assert!(card.cost.is_none());
        assert!(card.is_land());
        assert!(card.colors().is_empty());
    }

    #[test]
    fn test_deserialize_numeric_cost() {
        let json = r#"{"name": "Iron Idol", "grade": "C-", "cmc": 4, "type": "Artifact"}"#;
        let card: CardRecord = serde_json::from_str(json).unwrap();

        assert_eq!(card.cost.unwrap().generic, 4);
    }

    #[test]
    fn test_deserialize_rejects_bad_grade() {
        let json = r#"{"name": "Oddity", "grade": "Z", "cmc": "1U"}"#;
        assert!(serde_json::from_str::<CardRecord>(json).is_err());
    }

    #[test]
    fn test_missing_type_is_not_land() {
        let json = r#"{"name": "Mystery", "grade": "C"}"#;
        let card: CardRecord = serde_json::from_str(json).unwrap();

        assert_eq!(card.card_type, "");
        assert!(!card.is_land());
        assert!(!card.is_creature());
    }

    #[test]
    fn test_serialization_round_trip_keeps_text_fields() {
        let card = CardRecord::new("Bold Wolf", Grade::B, "1G".parse().ok(), "Creature — Wolf")
            .with_good_in("WG");

        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"goodIn\":\"WG\""));

        let back: CardRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }
}

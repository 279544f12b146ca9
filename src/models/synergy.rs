//! Synergy themes and detected synergy hits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A pool-wide theme a card can depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Equipment,
    Humans,
    Towns,
    Artifacts,
    Vehicles,
    Birds,
    Spells,
    Enchantments,
    Sacrifice,
    HighCmc,
}

impl Theme {
    pub const ALL: [Theme; 10] = [
        Theme::Equipment,
        Theme::Humans,
        Theme::Towns,
        Theme::Artifacts,
        Theme::Vehicles,
        Theme::Birds,
        Theme::Spells,
        Theme::Enchantments,
        Theme::Sacrifice,
        Theme::HighCmc,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Equipment => "equipment",
            Theme::Humans => "humans",
            Theme::Towns => "towns",
            Theme::Artifacts => "artifacts",
            Theme::Vehicles => "vehicles",
            Theme::Birds => "birds",
            Theme::Spells => "spells",
            Theme::Enchantments => "enchantments",
            Theme::Sacrifice => "sacrifice",
            Theme::HighCmc => "high-cmc",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown theme: {:?}", s))
    }
}

/// What kind of synergy was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynergyKind {
    /// A named partner card is in the pool
    Synergy,
    /// The pool meets the theme threshold
    Enabled,
    /// Some theme cards, but below the threshold
    Partial,
}

impl SynergyKind {
    pub fn symbol(self) -> &'static str {
        match self {
            SynergyKind::Synergy => "⚡",
            SynergyKind::Enabled => "⭐",
            SynergyKind::Partial => "⚠️",
        }
    }
}

/// A synergy detected for one card against a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synergy {
    pub kind: SynergyKind,
    pub note: String,
}

impl Synergy {
    pub fn symbol(&self) -> &'static str {
        self.kind.symbol()
    }
}

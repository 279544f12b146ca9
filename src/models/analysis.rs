//! Per-archetype analysis results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{ColorPair, CostSymbol, Grade, PoolCard};

/// How well a card suits a specific archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Best,
    Good,
    Poor,
    #[default]
    None,
}

impl Indicator {
    /// Grade steps applied for this indicator.
    pub fn delta(self) -> i32 {
        match self {
            Indicator::Best => 2,
            Indicator::Good => 1,
            Indicator::Poor => -1,
            Indicator::None => 0,
        }
    }

    /// Short marker used next to card names.
    pub fn marker(self) -> &'static str {
        match self {
            Indicator::Best => "[++]",
            Indicator::Good => "[+]",
            Indicator::Poor => "[-]",
            Indicator::None => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplashDifficulty {
    Manageable,
    Dangerous,
}

impl SplashDifficulty {
    pub fn for_extra_colors(count: usize) -> Self {
        if count >= 2 {
            SplashDifficulty::Dangerous
        } else {
            SplashDifficulty::Manageable
        }
    }
}

impl fmt::Display for SplashDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplashDifficulty::Manageable => write!(f, "manageable"),
            SplashDifficulty::Dangerous => write!(f, "dangerous"),
        }
    }
}

/// Colors a splash card needs beyond its archetype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Splash {
    pub extra_colors: Vec<CostSymbol>,
    pub difficulty: SplashDifficulty,
}

/// A pool card annotated for one archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedCard {
    pub card: PoolCard,
    pub adjusted_grade: Grade,
    pub indicator: Indicator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splash: Option<Splash>,
}

impl RatedCard {
    pub fn tier(&self) -> Tier {
        Tier::from_grade(self.adjusted_grade)
    }

    pub fn is_adjusted(&self) -> bool {
        self.adjusted_grade != self.card.grade
    }
}

/// Playability tier by adjusted grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// C+ and above
    Premium,
    /// C- and C
    Playable,
    /// D+ and below
    Filler,
}

impl Tier {
    pub fn from_grade(grade: Grade) -> Self {
        match grade.index() {
            i if i >= Grade::CPlus.index() => Tier::Premium,
            i if i >= Grade::CMinus.index() => Tier::Playable,
            _ => Tier::Filler,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Premium => write!(f, "Premium"),
            Tier::Playable => write!(f, "Playable"),
            Tier::Filler => write!(f, "Filler"),
        }
    }
}

/// Archetype-specific counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PairStat {
    /// WR
    Equipment { count: u32 },
    /// UR
    BigSpells { count: u32 },
    /// WG
    GoWide { count: u32 },
    /// WU
    Artifacts { count: u32 },
    /// UG
    TownLands {
        fitting: u32,
        non_fitting: u32,
        total: u32,
    },
}

/// Secondary counters for one archetype.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchetypeStats {
    pub removal_in_top: u32,
    pub removal_outside_top: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pair_stat: Option<PairStat>,
}

impl ArchetypeStats {
    pub fn removal_total(&self) -> u32 {
        self.removal_in_top + self.removal_outside_top
    }
}

/// Fitness of the pool for one color pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeAnalysis {
    pub pair: ColorPair,

    /// Final score after the creature penalty
    pub score: u32,

    /// Top-slice score before the penalty
    pub raw_score: u32,

    /// Cards playable in the pair, best first
    pub fitting_cards: Vec<RatedCard>,

    /// Strong off-color cards, best first
    pub splash_cards: Vec<RatedCard>,

    /// How many fitting cards made the scored slice
    pub top_count: usize,

    pub creature_count: u32,
    pub creature_penalty: u32,
    pub stats: ArchetypeStats,
}

impl ArchetypeAnalysis {
    /// The scored slice of the fitting list.
    pub fn top_cards(&self) -> &[RatedCard] {
        &self.fitting_cards[..self.top_count]
    }

    /// Fitting cards in a tier, best first.
    pub fn in_tier(&self, tier: Tier) -> Vec<&RatedCard> {
        self.fitting_cards
            .iter()
            .filter(|c| c.tier() == tier)
            .collect()
    }
}

/// Results of one full analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolAnalysis {
    pub archetypes: BTreeMap<ColorPair, ArchetypeAnalysis>,

    /// Land cards, best base grade first
    pub lands: Vec<PoolCard>,
}

impl PoolAnalysis {
    pub fn get(&self, pair: ColorPair) -> Option<&ArchetypeAnalysis> {
        self.archetypes.get(&pair)
    }

    /// Archetypes by score, best first. Ties keep pair order.
    pub fn ranked(&self) -> Vec<&ArchetypeAnalysis> {
        let mut sorted: Vec<_> = self.archetypes.values().collect();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted
    }

    /// The `n` best archetypes.
    pub fn best(&self, n: usize) -> Vec<&ArchetypeAnalysis> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

/// Pool split by base grade, ignoring archetypes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolOverview {
    /// C and above, best first
    pub main: Vec<PoolCard>,
    /// C- and below, best first
    pub filler: Vec<PoolCard>,
}

/// Raw color-pair fit score used for quick color suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairSuggestion {
    pub pair: ColorPair,
    pub score: u32,
}

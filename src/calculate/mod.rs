//! Archetype scoring engine.
//!
//! Scores a pool against every two-color pair:
//! - Fitting / splash / excluded classification per pair
//! - Archetype-adjusted grades and top-slice scoring
//! - Creature density penalty
//! - Removal and pair-specific secondary counts
//!
//! Everything here is a pure function of the pool and the static tables.
//! Cards are never modified; each pair gets its own [`RatedCard`] values.

pub mod indicator;
pub mod synergy;
pub mod tables;

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::ScoringConfig;
use crate::models::{
    fits, ArchetypeAnalysis, ArchetypeStats, CardRecord, ColorPair, Grade, PairStat,
    PairSuggestion, PoolAnalysis, PoolCard, PoolOverview, RatedCard,
};

pub use indicator::{adjusted_grade, indicator_for, splash_fit};
pub use synergy::{count_theme_cards, detect_synergies, matches_theme};

use tables::{
    listed, ARTIFACT_ENABLER, BIG_SPELLS, CREATURE_GENERATORS, GO_WIDE_CREATURES, REMOVAL_SPELLS,
    TOWN_LANDS,
};

/// Creatures, plus cards on the creature-generator list.
pub fn is_creature_or_generator(card: &CardRecord) -> bool {
    card.is_creature() || listed(CREATURE_GENERATORS, &card.name)
}

/// Non-land pool cards that fit `pair` and put creatures on the board.
pub fn count_creatures(pool: &[PoolCard], pair: ColorPair) -> u32 {
    pool.iter()
        .filter(|c| !c.is_land())
        .filter(|c| fits(c.cost.as_ref(), pair) && is_creature_or_generator(c))
        .count() as u32
}

/// Named big spell, or a non-creature costing four or more (X always counts).
pub fn is_big_spell(card: &CardRecord) -> bool {
    if listed(BIG_SPELLS, &card.name) {
        return true;
    }
    if card.is_creature() {
        return false;
    }
    match &card.cost {
        Some(cost) => cost.variable || cost.total() >= 4,
        None => false,
    }
}

/// Stable sort, best adjusted grade first.
fn sort_by_adjusted_grade(cards: &mut [RatedCard]) {
    cards.sort_by(|a, b| b.adjusted_grade.cmp(&a.adjusted_grade));
}

fn count_where<'a, I, F>(cards: I, pred: F) -> u32
where
    I: IntoIterator<Item = &'a RatedCard>,
    F: Fn(&CardRecord) -> bool,
{
    cards.into_iter().filter(|c| pred(&*c.card)).count() as u32
}

/// Scores pools against every color pair.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: ScoringConfig,
}

impl Analyzer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Analyze the pool for all ten pairs and collect its lands.
    pub fn analyze(&self, pool: &[PoolCard]) -> PoolAnalysis {
        let archetypes: BTreeMap<_, _> = ColorPair::ALL
            .into_iter()
            .map(|pair| (pair, self.analyze_pair(pool, pair)))
            .collect();

        let mut lands: Vec<PoolCard> = pool.iter().filter(|c| c.is_land()).cloned().collect();
        lands.sort_by(|a, b| b.grade.cmp(&a.grade));

        PoolAnalysis { archetypes, lands }
    }

    /// Analyze the pool for one pair.
    pub fn analyze_pair(&self, pool: &[PoolCard], pair: ColorPair) -> ArchetypeAnalysis {
        let mut fitting_cards = Vec::new();
        let mut splash_cards = Vec::new();

        for card in pool.iter().filter(|c| !c.is_land()) {
            let indicator = indicator_for(card, pair);
            let adjusted = card.grade.shift(indicator.delta());

            let splash = if fits(card.cost.as_ref(), pair) {
                None
            } else {
                match splash_fit(card, pair, self.config.splash_min_grade) {
                    Some(splash) => Some(splash),
                    None => continue,
                }
            };

            let rated = RatedCard {
                card: card.clone(),
                adjusted_grade: adjusted,
                indicator,
                splash,
            };
            if rated.splash.is_some() {
                splash_cards.push(rated);
            } else {
                fitting_cards.push(rated);
            }
        }

        sort_by_adjusted_grade(&mut fitting_cards);
        sort_by_adjusted_grade(&mut splash_cards);

        let top_count = fitting_cards.len().min(self.config.deck_size);
        let raw_score: u32 = fitting_cards[..top_count]
            .iter()
            .map(|c| c.adjusted_grade.weight())
            .sum();

        let creature_count = count_creatures(pool, pair);
        let creature_penalty = self
            .config
            .creature_target
            .saturating_sub(creature_count)
            * self.config.creature_penalty_per_missing;
        let score = raw_score.saturating_sub(creature_penalty);

        let (top, rest) = fitting_cards.split_at(top_count);
        let removal = |c: &CardRecord| listed(REMOVAL_SPELLS, &c.name);
        let stats = ArchetypeStats {
            removal_in_top: count_where(top, removal),
            removal_outside_top: count_where(rest, removal),
            pair_stat: pair_stat(pair, &fitting_cards, pool),
        };

        debug!(
            "{}: {} fitting, {} splash, score {} (raw {}, penalty {})",
            pair,
            fitting_cards.len(),
            splash_cards.len(),
            score,
            raw_score,
            creature_penalty
        );

        ArchetypeAnalysis {
            pair,
            score,
            raw_score,
            fitting_cards,
            splash_cards,
            top_count,
            creature_count,
            creature_penalty,
            stats,
        }
    }
}

/// The extra counter a pair tracks, if any.
///
/// Counts run over the pair's fitting cards, except town lands which are
/// lands and so are counted over the whole pool.
fn pair_stat(pair: ColorPair, fitting: &[RatedCard], pool: &[PoolCard]) -> Option<PairStat> {
    match pair {
        ColorPair::WR => Some(PairStat::Equipment {
            count: count_where(fitting, |c| c.type_contains("equipment")),
        }),
        ColorPair::UR => Some(PairStat::BigSpells {
            count: count_where(fitting, is_big_spell),
        }),
        ColorPair::WG => Some(PairStat::GoWide {
            count: count_where(fitting, |c| listed(GO_WIDE_CREATURES, &c.name)),
        }),
        ColorPair::WU => Some(PairStat::Artifacts {
            count: count_where(fitting, |c| {
                c.type_contains("artifact") || c.name == ARTIFACT_ENABLER
            }),
        }),
        ColorPair::UG => {
            let towns: Vec<_> = pool
                .iter()
                .filter(|c| listed(TOWN_LANDS, &c.name))
                .collect();
            let fitting = towns
                .iter()
                .filter(|c| fits(c.cost.as_ref(), pair))
                .count() as u32;
            let total = towns.len() as u32;
            Some(PairStat::TownLands {
                fitting,
                non_fitting: total - fitting,
                total,
            })
        }
        _ => None,
    }
}

/// Analyze with default scoring parameters.
pub fn analyze(pool: &[PoolCard]) -> PoolAnalysis {
    Analyzer::default().analyze(pool)
}

/// Quick per-pair fit scores, best first, at most `limit` entries.
///
/// Sums the adjusted weight of every pool card that fits the pair, lands
/// included, with no top slice and no creature penalty.
pub fn suggest_color_pairs(pool: &[PoolCard], limit: usize) -> Vec<PairSuggestion> {
    let mut suggestions: Vec<PairSuggestion> = ColorPair::ALL
        .into_iter()
        .map(|pair| PairSuggestion {
            pair,
            score: pool
                .iter()
                .filter(|c| fits(c.cost.as_ref(), pair))
                .map(|c| adjusted_grade(c, pair).weight())
                .sum(),
        })
        .collect();

    suggestions.sort_by(|a, b| b.score.cmp(&a.score));
    suggestions.truncate(limit);
    suggestions
}

/// Split the pool at base grade C, best first within each half.
pub fn pool_overview(pool: &[PoolCard]) -> PoolOverview {
    let (mut main, mut filler): (Vec<PoolCard>, Vec<PoolCard>) =
        pool.iter().cloned().partition(|c| c.grade >= Grade::C);

    main.sort_by(|a, b| b.grade.cmp(&a.grade));
    filler.sort_by(|a, b| b.grade.cmp(&a.grade));

    PoolOverview { main, filler }
}

//! Archetype indicators, grade adjustment and splash detection.

use crate::models::{CardRecord, ColorPair, Grade, Indicator, Splash, SplashDifficulty};

/// Lowest grade a card may hold to be worth splashing.
pub const DEFAULT_SPLASH_MIN_GRADE: Grade = Grade::BMinus;

/// Classify how a card suits `pair`.
///
/// Best is checked before poor, so a pair listed in both resolves to best.
pub fn indicator_for(card: &CardRecord, pair: ColorPair) -> Indicator {
    if card.best_in.covers(pair) {
        Indicator::Best
    } else if card.poor_in.lists(pair) {
        Indicator::Poor
    } else if card.good_in.covers(pair) {
        Indicator::Good
    } else {
        Indicator::None
    }
}

/// Base grade shifted by the card's indicator for `pair`.
pub fn adjusted_grade(card: &CardRecord, pair: ColorPair) -> Grade {
    card.grade.shift(indicator_for(card, pair).delta())
}

/// Splash details if `card` is worth splashing into `pair`.
///
/// The card's base grade must reach `min_grade`. Its cost needs at least one
/// symbol inside the pair and at least one outside it.
pub fn splash_fit(card: &CardRecord, pair: ColorPair, min_grade: Grade) -> Option<Splash> {
    if card.grade < min_grade {
        return None;
    }

    let cost = card.cost.as_ref()?;
    if !cost.symbols.iter().any(|s| s.in_pair(pair)) {
        return None;
    }

    let extra_colors: Vec<_> = cost
        .distinct_symbols()
        .into_iter()
        .filter(|s| !s.in_pair(pair))
        .collect();
    if extra_colors.is_empty() {
        return None;
    }

    let difficulty = SplashDifficulty::for_extra_colors(extra_colors.len());
    Some(Splash {
        extra_colors,
        difficulty,
    })
}

//! Synergy detection against the full pool.

use tracing::debug;

use super::tables::{synergy_rule, SynergyRule};
use crate::models::{CardRecord, PoolCard, Synergy, SynergyKind, Theme};

/// Whether a card belongs to a theme.
pub fn matches_theme(card: &CardRecord, theme: Theme) -> bool {
    match theme {
        Theme::Equipment => card.type_contains("equipment"),
        Theme::Humans => card.type_contains("human"),
        Theme::Towns => card.type_contains("town"),
        Theme::Artifacts => card.type_contains("artifact"),
        Theme::Vehicles => card.type_contains("vehicle"),
        Theme::Birds => card.type_contains("bird"),
        Theme::Spells => card.type_contains("instant") || card.type_contains("sorcery"),
        Theme::Enchantments => card.type_contains("enchantment"),
        Theme::Sacrifice => {
            card.type_contains("artifact")
                || card
                    .thoughts
                    .as_deref()
                    .is_some_and(|t| t.to_lowercase().contains("material"))
        }
        Theme::HighCmc => card.cost.as_ref().map_or(0, |c| c.generic_digits) >= 5,
    }
}

/// Count pool cards in a theme.
pub fn count_theme_cards(pool: &[PoolCard], theme: Theme) -> usize {
    pool.iter().filter(|c| matches_theme(c, theme)).count()
}

/// Synergies for `card_name` given everything in the pool.
///
/// Returns at most one hit. Cards without a rule, pairwise rules with no
/// partner present and themes with no cards at all yield nothing.
pub fn detect_synergies(pool: &[PoolCard], card_name: &str) -> Vec<Synergy> {
    let Some(rule) = synergy_rule(card_name) else {
        return Vec::new();
    };

    let hit = match *rule {
        SynergyRule::Pairwise { partners, note, .. } => {
            let has_partner = partners
                .iter()
                .any(|partner| pool.iter().any(|c| c.name == *partner));
            has_partner.then(|| Synergy {
                kind: SynergyKind::Synergy,
                note: note.to_string(),
            })
        }
        SynergyRule::ThemeCount {
            theme,
            threshold,
            note,
        } => {
            let count = count_theme_cards(pool, theme);
            if count >= threshold {
                Some(Synergy {
                    kind: SynergyKind::Enabled,
                    note: format!("{} ({} {} cards)", note, count, theme),
                })
            } else if count > 0 {
                Some(Synergy {
                    kind: SynergyKind::Partial,
                    note: format!("{} (Need {} more {})", note, threshold - count, theme),
                })
            } else {
                None
            }
        }
    };

    if let Some(ref hit) = hit {
        debug!("Synergy for {}: {:?}", card_name, hit.kind);
    }
    hit.into_iter().collect()
}

//! Static card-name tables used by the analyzer.

use crate::models::Theme;

/// Non-creature cards that put creatures onto the battlefield.
pub const CREATURE_GENERATORS: &[&str] = &[
    "Raise the Militia",
    "Gathering of Moogles",
    "Call the Chocobos",
    "Summon: Knights of Round",
];

/// Cards counted as removal.
pub const REMOVAL_SPELLS: &[&str] = &[
    "Holy Judgment",
    "Tidal Rebuke",
    "Shadow Strike",
    "Soul Siphon",
    "Firaga Burst",
    "Verdant Snare",
    "Shadow and Flame",
    "Grim Harvest",
    "Flare Star",
];

/// Spells the UR deck always counts as big, whatever their cost.
pub const BIG_SPELLS: &[&str] = &["Mindflayer Tide", "Arcane Torrent", "Summon: Leviathan"];

/// Creatures and token makers that reward the WG go-wide plan.
pub const GO_WIDE_CREATURES: &[&str] = &[
    "Village Elder",
    "Moogle Sentry",
    "Chocobo Rider",
    "Raise the Militia",
    "Gathering of Moogles",
    "Call the Chocobos",
];

/// Named card WU counts as an artifact enabler.
pub const ARTIFACT_ENABLER: &str = "Retrieve the Esper";

pub const TOWN_LANDS: &[&str] = &[
    "Midgar, City of Mako",
    "Zanarkand, Ancient Metropolis",
    "Starting Town",
    "Ishgard, the Holy See",
    "Windurst, Federation Center",
];

/// Whether a pairwise rule is one-sided or listed on both cards.
///
/// Only records where the rule came from; both kinds are detected the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairwiseKind {
    Specific,
    Mutual,
}

/// How a card's synergy is evaluated against a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynergyRule {
    /// Any named partner in the pool triggers the synergy.
    Pairwise {
        kind: PairwiseKind,
        partners: &'static [&'static str],
        note: &'static str,
    },
    /// Enough cards of a theme in the pool enable the card.
    ThemeCount {
        theme: Theme,
        threshold: usize,
        note: &'static str,
    },
}

/// Threshold used when a theme rule does not name one.
pub const DEFAULT_THEME_THRESHOLD: usize = 3;

/// Synergy rules keyed by exact card name. One rule per card at most.
pub const CARD_SYNERGIES: &[(&str, SynergyRule)] = &[
    (
        "Buster Sword",
        SynergyRule::Pairwise {
            kind: PairwiseKind::Specific,
            partners: &["Cloud, Ex-Soldier"],
            note: "Cloud's signature weapon",
        },
    ),
    (
        "Cloud, Ex-Soldier",
        SynergyRule::Pairwise {
            kind: PairwiseKind::Mutual,
            partners: &["Buster Sword"],
            note: "Attaches the Buster Sword for free",
        },
    ),
    (
        "Ragnarok Blade",
        SynergyRule::Pairwise {
            kind: PairwiseKind::Specific,
            partners: &["Knight of the Crystal", "Lightning Knight"],
            note: "Knights wield it best",
        },
    ),
    (
        "Forge Smith",
        SynergyRule::ThemeCount {
            theme: Theme::Equipment,
            threshold: 2,
            note: "Discounts equip costs",
        },
    ),
    (
        "Knight of the Crystal",
        SynergyRule::ThemeCount {
            theme: Theme::Humans,
            threshold: 4,
            note: "Grows with other humans",
        },
    ),
    (
        "Guardian Force Summoner",
        SynergyRule::ThemeCount {
            theme: Theme::Towns,
            threshold: 2,
            note: "Draws a card per town",
        },
    ),
    (
        "Airship Mechanic",
        SynergyRule::ThemeCount {
            theme: Theme::Artifacts,
            threshold: DEFAULT_THEME_THRESHOLD,
            note: "Artifact payoff",
        },
    ),
    (
        "Magitek Armor",
        SynergyRule::ThemeCount {
            theme: Theme::Humans,
            threshold: DEFAULT_THEME_THRESHOLD,
            note: "Needs pilots to crew",
        },
    ),
    (
        "Chocobo Rider",
        SynergyRule::ThemeCount {
            theme: Theme::Birds,
            threshold: DEFAULT_THEME_THRESHOLD,
            note: "Leads the chocobo flock",
        },
    ),
    (
        "Sky Pirate Captain",
        SynergyRule::ThemeCount {
            theme: Theme::Vehicles,
            threshold: 2,
            note: "Crews vehicles each turn",
        },
    ),
    (
        "Arcane Scholar",
        SynergyRule::ThemeCount {
            theme: Theme::Spells,
            threshold: DEFAULT_THEME_THRESHOLD,
            note: "Triggers on every instant and sorcery",
        },
    ),
    (
        "Village Elder",
        SynergyRule::ThemeCount {
            theme: Theme::Enchantments,
            threshold: 2,
            note: "Enchantment payoff",
        },
    ),
    (
        "Vile Ritualist",
        SynergyRule::ThemeCount {
            theme: Theme::Sacrifice,
            threshold: DEFAULT_THEME_THRESHOLD,
            note: "Needs sacrifice fodder",
        },
    ),
    (
        "Grove Guardian",
        SynergyRule::ThemeCount {
            theme: Theme::HighCmc,
            threshold: 2,
            note: "Ramps into expensive threats",
        },
    ),
];

/// Synergy rule for a card, by exact name.
pub fn synergy_rule(card_name: &str) -> Option<&'static SynergyRule> {
    CARD_SYNERGIES
        .iter()
        .find(|(name, _)| *name == card_name)
        .map(|(_, rule)| rule)
}

/// Whether `name` is on one of the static name lists.
pub fn listed(list: &[&str], name: &str) -> bool {
    list.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_synergy_table_has_unique_keys() {
        let names: HashSet<_> = CARD_SYNERGIES.iter().map(|(n, _)| *n).collect();
        assert_eq!(names.len(), CARD_SYNERGIES.len());
    }

    #[test]
    fn test_synergy_rule_lookup_is_exact() {
        assert!(synergy_rule("Buster Sword").is_some());
        assert!(synergy_rule("buster sword").is_none());
        assert!(synergy_rule("Bold Wolf").is_none());
    }

    #[test]
    fn test_table_names_are_in_embedded_rankings() {
        let catalog = crate::catalog::RankingsCatalog::embedded();
        let ranked: HashSet<_> = catalog.cards().iter().map(|c| c.name.as_str()).collect();

        let mut names: Vec<&str> = Vec::new();
        names.extend(CREATURE_GENERATORS);
        names.extend(REMOVAL_SPELLS);
        names.extend(BIG_SPELLS);
        names.extend(GO_WIDE_CREATURES);
        names.extend(TOWN_LANDS);
        names.push(ARTIFACT_ENABLER);
        for (name, rule) in CARD_SYNERGIES {
            names.push(name);
            if let SynergyRule::Pairwise { partners, .. } = rule {
                names.extend(partners.iter());
            }
        }

        for name in names {
            assert!(ranked.contains(name), "{} missing from rankings", name);
        }
    }

    #[test]
    fn test_listed() {
        assert!(listed(REMOVAL_SPELLS, "Firaga Burst"));
        assert!(!listed(REMOVAL_SPELLS, "firaga burst"));
    }
}

//! Compact color-cost strings ("2UR", "XG", "3").

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Color, ColorPair, ColorSet};

/// One non-generic symbol of a cost.
///
/// Uppercase WUBRG letters are colors. Any other symbol is kept as written
/// and acts as a color outside every pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "char", into = "char")]
pub enum CostSymbol {
    Color(Color),
    Other(char),
}

impl CostSymbol {
    pub fn symbol(self) -> char {
        match self {
            CostSymbol::Color(color) => color.symbol(),
            CostSymbol::Other(c) => c,
        }
    }

    pub fn color(self) -> Option<Color> {
        match self {
            CostSymbol::Color(color) => Some(color),
            CostSymbol::Other(_) => None,
        }
    }

    /// Whether this symbol is one of `pair`'s colors.
    pub fn in_pair(self, pair: ColorPair) -> bool {
        self.color()
            .is_some_and(|color| pair.color_set().contains(color))
    }
}

impl From<char> for CostSymbol {
    fn from(c: char) -> Self {
        Color::from_symbol(c).map_or(CostSymbol::Other(c), CostSymbol::Color)
    }
}

impl From<Color> for CostSymbol {
    fn from(color: Color) -> Self {
        CostSymbol::Color(color)
    }
}

impl From<CostSymbol> for char {
    fn from(symbol: CostSymbol) -> Self {
        symbol.symbol()
    }
}

impl fmt::Display for CostSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A parsed color cost.
///
/// Digit runs are generic cost segments and `X` marks a variable cost. `+`
/// separators and whitespace are ignored. Every other character is one
/// symbol, matched case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ManaCost {
    raw: String,
    /// Sum of all generic segments.
    pub generic: u32,
    /// Generic digits read as one number ("1U1" reads as 11), saturating.
    pub generic_digits: u64,
    /// Cost contains `X`.
    pub variable: bool,
    /// Symbols in written order, repeats kept.
    pub symbols: Vec<CostSymbol>,
}

impl ManaCost {
    /// Parse a cost string. Empty or blank input has no cost at all.
    pub fn parse(s: &str) -> Option<Self> {
        let raw = s.trim();
        if raw.is_empty() {
            return None;
        }

        let mut generic = 0u32;
        let mut generic_digits = 0u64;
        let mut segment = 0u32;
        let mut variable = false;
        let mut symbols = Vec::new();

        for c in raw.chars() {
            if let Some(d) = c.to_digit(10) {
                segment = segment.saturating_mul(10).saturating_add(d);
                generic_digits = generic_digits
                    .saturating_mul(10)
                    .saturating_add(u64::from(d));
                continue;
            }
            generic = generic.saturating_add(segment);
            segment = 0;
            match c {
                'X' => variable = true,
                '+' => {}
                c if c.is_whitespace() => {}
                c => symbols.push(CostSymbol::from(c)),
            }
        }
        generic = generic.saturating_add(segment);

        Some(Self {
            raw: raw.to_string(),
            generic,
            generic_digits,
            variable,
            symbols,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Colored pips in written order.
    pub fn pips(&self) -> impl Iterator<Item = Color> + '_ {
        self.symbols.iter().filter_map(|s| s.color())
    }

    /// Distinct colors required.
    pub fn colors(&self) -> ColorSet {
        self.pips().collect()
    }

    /// Whether the cost holds a symbol that is not a color.
    pub fn has_other_symbols(&self) -> bool {
        self.symbols.iter().any(|s| s.color().is_none())
    }

    /// Generic cost plus one per symbol.
    pub fn total(&self) -> u32 {
        self.generic.saturating_add(self.symbols.len() as u32)
    }

    /// Distinct symbols in first-written order.
    pub fn distinct_symbols(&self) -> Vec<CostSymbol> {
        let mut seen = Vec::new();
        for &s in &self.symbols {
            if !seen.contains(&s) {
                seen.push(s);
            }
        }
        seen
    }
}

/// Whether a card with this cost can be played in `pair`.
///
/// Costs without symbols (or no cost at all) fit every pair. A symbol that
/// is not a color fits no pair.
pub fn fits(cost: Option<&ManaCost>, pair: ColorPair) -> bool {
    match cost {
        None => true,
        Some(cost) => cost.symbols.iter().all(|s| s.in_pair(pair)),
    }
}

impl fmt::Display for ManaCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl FromStr for ManaCost {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ManaCost::parse(s).ok_or_else(|| "empty cost".to_string())
    }
}

impl TryFrom<String> for ManaCost {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ManaCost> for String {
    fn from(cost: ManaCost) -> Self {
        cost.raw
    }
}

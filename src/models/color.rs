//! Colors, color sets and the ten two-color archetype pairs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "U")]
    Blue,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
}

impl Color {
    pub const ALL: [Color; 5] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    /// Parse a single pip letter. Only uppercase WUBRG is a color.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'W' => Some(Color::White),
            'U' => Some(Color::Blue),
            'B' => Some(Color::Black),
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A set of colors represented as bitflags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorSet(u8);

impl ColorSet {
    pub const COLORLESS: Self = Self(0);

    pub const fn from_color(color: Color) -> Self {
        match color {
            Color::White => Self(1 << 0),
            Color::Blue => Self(1 << 1),
            Color::Black => Self(1 << 2),
            Color::Red => Self(1 << 3),
            Color::Green => Self(1 << 4),
        }
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, color: Color) -> bool {
        self.0 & Self::from_color(color).0 != 0
    }

    /// True if every color of `other` is in this set.
    pub const fn contains_all(self, other: ColorSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: ColorSet) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn union(self, other: ColorSet) -> Self {
        Self(self.0 | other.0)
    }

    /// Colors in this set that are not in `other`.
    pub const fn difference(self, other: ColorSet) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn with(self, color: Color) -> Self {
        self.union(Self::from_color(color))
    }

    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Colors in WUBRG order.
    pub fn iter(self) -> impl Iterator<Item = Color> {
        Color::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Color> for ColorSet {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        iter.into_iter().fold(ColorSet::COLORLESS, ColorSet::with)
    }
}

/// One of the ten two-color archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColorPair {
    WU,
    WB,
    WR,
    WG,
    UB,
    UR,
    UG,
    BR,
    BG,
    RG,
}

impl ColorPair {
    pub const ALL: [ColorPair; 10] = [
        ColorPair::WU,
        ColorPair::WB,
        ColorPair::WR,
        ColorPair::WG,
        ColorPair::UB,
        ColorPair::UR,
        ColorPair::UG,
        ColorPair::BR,
        ColorPair::BG,
        ColorPair::RG,
    ];

    /// Canonical two-letter code.
    pub fn code(self) -> &'static str {
        match self {
            ColorPair::WU => "WU",
            ColorPair::WB => "WB",
            ColorPair::WR => "WR",
            ColorPair::WG => "WG",
            ColorPair::UB => "UB",
            ColorPair::UR => "UR",
            ColorPair::UG => "UG",
            ColorPair::BR => "BR",
            ColorPair::BG => "BG",
            ColorPair::RG => "RG",
        }
    }

    pub fn colors(self) -> (Color, Color) {
        use Color::*;
        match self {
            ColorPair::WU => (White, Blue),
            ColorPair::WB => (White, Black),
            ColorPair::WR => (White, Red),
            ColorPair::WG => (White, Green),
            ColorPair::UB => (Blue, Black),
            ColorPair::UR => (Blue, Red),
            ColorPair::UG => (Blue, Green),
            ColorPair::BR => (Black, Red),
            ColorPair::BG => (Black, Green),
            ColorPair::RG => (Red, Green),
        }
    }

    pub fn color_set(self) -> ColorSet {
        let (a, b) = self.colors();
        ColorSet::from_color(a).with(b)
    }

    /// The pair made of exactly these two colors, in either order.
    pub fn from_colors(a: Color, b: Color) -> Option<Self> {
        let wanted = ColorSet::from_color(a).with(b);
        Self::ALL.into_iter().find(|p| p.color_set() == wanted)
    }
}

impl fmt::Display for ColorPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for ColorPair {
    type Err = String;

    /// Accepts either letter order and either case ("UG", "gu").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letters: Vec<Color> = s
            .trim()
            .chars()
            .map(|c| Color::from_symbol(c.to_ascii_uppercase()))
            .collect::<Option<_>>()
            .ok_or_else(|| format!("unknown color pair: {:?}", s))?;

        match letters.as_slice() {
            [a, b] => ColorPair::from_colors(*a, *b),
            _ => None,
        }
        .ok_or_else(|| format!("unknown color pair: {:?}", s))
    }
}

impl TryFrom<String> for ColorPair {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColorPair> for String {
    fn from(pair: ColorPair) -> Self {
        pair.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_set_operations() {
        let set: ColorSet = [Color::Blue, Color::Red, Color::Blue].into_iter().collect();
        assert_eq!(set.count(), 2);
        assert!(set.contains(Color::Blue));
        assert!(!set.contains(Color::Green));

        let pair = ColorPair::UG.color_set();
        assert!(set.intersects(pair));
        assert!(!pair.contains_all(set));
        assert_eq!(set.difference(pair).iter().collect::<Vec<_>>(), vec![Color::Red]);
    }

    #[test]
    fn test_pair_codes_round_trip() {
        for pair in ColorPair::ALL {
            assert_eq!(pair.code().parse::<ColorPair>().unwrap(), pair);
        }
    }

    #[test]
    fn test_pair_parse_is_order_and_case_insensitive() {
        assert_eq!("GU".parse::<ColorPair>().unwrap(), ColorPair::UG);
        assert_eq!("wg".parse::<ColorPair>().unwrap(), ColorPair::WG);
        assert_eq!("RB".parse::<ColorPair>().unwrap(), ColorPair::BR);
    }

    #[test]
    fn test_pair_parse_rejects_invalid() {
        assert!("WW".parse::<ColorPair>().is_err());
        assert!("W".parse::<ColorPair>().is_err());
        assert!("WUB".parse::<ColorPair>().is_err());
        assert!("XY".parse::<ColorPair>().is_err());
    }

    #[test]
    fn test_pair_serialization() {
        let json = serde_json::to_string(&ColorPair::BG).unwrap();
        assert_eq!(json, "\"BG\"");

        let deserialized: ColorPair = serde_json::from_str("\"GB\"").unwrap();
        assert_eq!(deserialized, ColorPair::BG);
    }
}

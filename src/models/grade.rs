//! Letter grade scale.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A letter grade on the fixed 13-step scale, worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Grade {
    F,
    DMinus,
    D,
    DPlus,
    CMinus,
    C,
    CPlus,
    BMinus,
    B,
    BPlus,
    AMinus,
    A,
    APlus,
}

impl Grade {
    /// All grades, index 0 (F) through 12 (A+).
    pub const ALL: [Grade; 13] = [
        Grade::F,
        Grade::DMinus,
        Grade::D,
        Grade::DPlus,
        Grade::CMinus,
        Grade::C,
        Grade::CPlus,
        Grade::BMinus,
        Grade::B,
        Grade::BPlus,
        Grade::AMinus,
        Grade::A,
        Grade::APlus,
    ];

    /// Highest index on the scale.
    pub const MAX_INDEX: usize = Self::ALL.len() - 1;

    /// Position on the scale (0 = F, 12 = A+).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Scoring weight (F = 1, A+ = 13).
    pub fn weight(self) -> u32 {
        self.index() as u32 + 1
    }

    /// Grade at a scale position, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Move `delta` steps along the scale, clamped to [F, A+].
    pub fn shift(self, delta: i32) -> Self {
        let target = (self.index() as i64 + delta as i64).clamp(0, Self::MAX_INDEX as i64);
        Self::ALL[target as usize]
    }

    /// Label as written in rankings data ("B-", "A+").
    pub fn label(self) -> &'static str {
        match self {
            Grade::F => "F",
            Grade::DMinus => "D-",
            Grade::D => "D",
            Grade::DPlus => "D+",
            Grade::CMinus => "C-",
            Grade::C => "C",
            Grade::CPlus => "C+",
            Grade::BMinus => "B-",
            Grade::B => "B",
            Grade::BPlus => "B+",
            Grade::AMinus => "A-",
            Grade::A => "A",
            Grade::APlus => "A+",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|g| g.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown grade: {:?}", s))
    }
}

impl TryFrom<String> for Grade {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Grade> for String {
    fn from(grade: Grade) -> Self {
        grade.label().to_string()
    }
}

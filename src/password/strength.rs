//! Heuristic password strength score (0-100).
//!
//! Weights are fixed so results are reproducible:
//!
//! | rule                              | points |
//! |-----------------------------------|--------|
//! | length >= 12 / >= 8 / >= 6        | 25 / 15 / 5 |
//! | each class present (lower, upper, digit, symbol) | 15 |
//! | unique chars / length > 0.7       | 20     |
//!
//! The total is capped at 100.  A symbol is any character that is
//! neither alphanumeric nor whitespace.  This is not an entropy estimate.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

const CLASS_POINTS: u32 = 15;
const VARIETY_POINTS: u32 = 20;
const MAX_SCORE: u32 = 100;

/// Categorical rating derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum StrengthLabel {
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthLabel {
    /// `<40` Weak, `40-59` Fair, `60-79` Good, `>=80` Strong.
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Strong,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            _ => Self::Weak,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Strong => "Strong",
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score plus label for one password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Strength {
    pub score: u8,
    pub label: StrengthLabel,
}

/// Rate `password`.
pub fn score(password: &str) -> Strength {
    let length = password.chars().count();
    if length == 0 {
        return Strength {
            score: 0,
            label: StrengthLabel::Weak,
        };
    }

    let mut total: u32 = match length {
        12.. => 25,
        8..=11 => 15,
        6..=7 => 5,
        _ => 0,
    };

    let has_lower = password.chars().any(char::is_lowercase);
    let has_upper = password.chars().any(char::is_uppercase);
    let has_digit = password.chars().any(char::is_numeric);
    let has_symbol = password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace());

    let classes = [has_lower, has_upper, has_digit, has_symbol]
        .iter()
        .filter(|present| **present)
        .count() as u32;
    total += classes * CLASS_POINTS;

    // unique / length > 0.7, in integers.
    let unique = password.chars().collect::<HashSet<_>>().len();
    if unique * 10 > length * 7 {
        total += VARIETY_POINTS;
    }

    let score = total.min(MAX_SCORE) as u8;
    Strength {
        score,
        label: StrengthLabel::from_score(score),
    }
}

//! Recall grades offered to the learner after revealing a card.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Hard,
    Good,
    Easy,
}

impl Grade {
    /// SM-2 quality score. Every exposed grade is a passing one (>= 3).
    pub fn quality(self) -> u8 {
        match self {
            Grade::Easy => 5,
            Grade::Good => 4,
            Grade::Hard => 3,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Grade::Hard => "hard",
            Grade::Good => "good",
            Grade::Easy => "easy",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown grade '{0}', expected hard, good or easy")]
pub struct ParseGradeError(pub String);

impl FromStr for Grade {
    type Err = ParseGradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hard" | "h" => Ok(Grade::Hard),
            "good" | "g" => Ok(Grade::Good),
            "easy" | "e" => Ok(Grade::Easy),
            _ => Err(ParseGradeError(s.to_string())),
        }
    }
}

//! Difficulty levels and the scoring table derived from them.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

/// Question difficulty.
///
/// Parsing is lenient: any unrecognized value maps to `Medium`, so a record
/// with an odd difficulty string still gets the middle row of the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 45 seconds, 10 points.
    Easy,
    /// 30 seconds, 20 points.
    #[default]
    Medium,
    /// 20 seconds, 30 points.
    Hard,
}

/// Time limit and point value for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoring {
    /// How long the player has to answer.
    pub time_limit: Duration,
    /// Points awarded for a correct answer.
    pub points: u32,
}

impl Difficulty {
    /// Every difficulty, easiest first.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Parses a difficulty name, defaulting to `Medium` for anything unknown.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "easy" => Self::Easy,
            "hard" => Self::Hard,
            _ => Self::Medium,
        }
    }

    /// Returns the lower-cased name used by the remote API.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Looks up the fixed scoring row for this difficulty.
    #[must_use]
    pub fn scoring(self) -> Scoring {
        let (secs, points) = match self {
            Self::Easy => (45, 10),
            Self::Medium => (30, 20),
            Self::Hard => (20, 30),
        };
        Scoring {
            time_limit: Duration::from_secs(secs),
            points,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&raw))
    }
}

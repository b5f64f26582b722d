//! Question categories used by the board game.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// The board's category vocabulary. Names are the lower-cased Spanish keys
/// used by the local bank and the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// History.
    Historia,
    /// Science and nature.
    Ciencia,
    /// Geography.
    Geografia,
    /// Sports.
    Deportes,
    /// Art.
    Arte,
    /// Film, music and television.
    Entretenimiento,
}

impl Category {
    /// Every category, in board order.
    pub const ALL: [Self; 6] = [
        Self::Historia,
        Self::Ciencia,
        Self::Geografia,
        Self::Deportes,
        Self::Arte,
        Self::Entretenimiento,
    ];

    /// Returns the lower-cased key for this category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Historia => "historia",
            Self::Ciencia => "ciencia",
            Self::Geografia => "geografia",
            Self::Deportes => "deportes",
            Self::Arte => "arte",
            Self::Entretenimiento => "entretenimiento",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        match key.as_str() {
            "historia" => Ok(Self::Historia),
            "ciencia" => Ok(Self::Ciencia),
            "geografia" | "geografía" => Ok(Self::Geografia),
            "deportes" => Ok(Self::Deportes),
            "arte" => Ok(Self::Arte),
            "entretenimiento" => Ok(Self::Entretenimiento),
            _ => Err(SourceError::InvalidCategory(s.to_owned())),
        }
    }
}

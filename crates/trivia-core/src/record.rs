//! Raw question records emitted by question sources.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::difficulty::Difficulty;
use crate::error::RecordError;

/// Where a raw record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// The remote trivia API.
    Remote,
    /// The local fallback bank.
    Fallback,
}

impl Provenance {
    /// Returns the lower-cased tag exposed to callers.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Fallback => "fallback",
        }
    }
}

/// Transient producer output, consumed by the question factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawQuestionRecord {
    /// Question text in the source language.
    pub text: String,
    /// Answer options in the order the producer emitted them.
    pub answers: Vec<String>,
    /// Index of the correct option in `answers`.
    pub correct_index: usize,
    /// Board category.
    pub category: Category,
    /// Difficulty level.
    pub difficulty: Difficulty,
    /// Which tier produced the record.
    pub provenance: Provenance,
}

impl RawQuestionRecord {
    /// Checks that the record has at least two answers and that
    /// `correct_index` points into them.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::TooFewAnswers` or
    /// `RecordError::CorrectIndexOutOfRange`.
    pub fn validate(&self) -> Result<(), RecordError> {
        let len = self.answers.len();
        if len < 2 {
            return Err(RecordError::TooFewAnswers(len));
        }
        if self.correct_index >= len {
            return Err(RecordError::CorrectIndexOutOfRange {
                index: self.correct_index,
                len,
            });
        }
        Ok(())
    }

    /// Returns the correct answer text, if the index is valid.
    #[must_use]
    pub fn correct_answer(&self) -> Option<&str> {
        self.answers.get(self.correct_index).map(String::as_str)
    }
}

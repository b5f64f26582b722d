//! Domain error types.

use thiserror::Error;

use crate::category::Category;

/// Failure of a question source tier.
///
/// The pipeline matches on the variant to decide whether the next tier is
/// tried: only `SourceUnavailable` falls through to the local bank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The category name is not part of the vocabulary, or the remote API has
    /// no code for it.
    #[error("invalid category: {0}")]
    InvalidCategory(String),

    /// The remote call could not complete, or completed with a non-success
    /// response code.
    #[error("question source unavailable: {0}")]
    SourceUnavailable(String),

    /// The local bank has no records for the category.
    #[error("no fallback questions available for category {0}")]
    NoFallbackAvailable(Category),
}

/// A raw record that violates the question invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Fewer than two answer options.
    #[error("a question needs at least two answers, got {0}")]
    TooFewAnswers(usize),

    /// The correct index does not point into the answers.
    #[error("correct index {index} is out of range for {len} answers")]
    CorrectIndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of answers in the record.
        len: usize,
    },

    /// Translated answers are not index-aligned with the originals.
    #[error("translated answers are not aligned: expected {expected}, got {actual}")]
    MisalignedTranslation {
        /// Number of original answers.
        expected: usize,
        /// Number of translated answers.
        actual: usize,
    },

    /// No entry was flagged correct during an ingestion shuffle.
    #[error("no answer is flagged as correct")]
    NoCorrectAnswer,
}

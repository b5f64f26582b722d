//! Answer shuffling.
//!
//! Two independent shuffles exist. The ingestion shuffle runs once on a fresh
//! remote record and moves the correct answer to a random slot before the
//! question is built. The presentation shuffle runs on the question itself,
//! is memoized as a permutation of original indices, and is replayed against
//! whichever answer set (original or translated) is on display.

use serde::Serialize;

use crate::error::RecordError;
use crate::rng::DeterministicRng;

/// Returns a uniformly random permutation of `0..len` (Fisher–Yates).
pub fn fisher_yates(len: usize, rng: &mut dyn DeterministicRng) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    for i in (1..len).rev() {
        let bound = u32::try_from(i).unwrap_or(u32::MAX);
        let j = (rng.next_u32_range(0, bound) as usize).min(i);
        order.swap(i, j);
    }
    order
}

/// Shuffles `items` in place with a fresh Fisher–Yates permutation.
pub fn shuffle_in_place<T>(items: &mut Vec<T>, rng: &mut dyn DeterministicRng) {
    let order = fisher_yates(items.len(), rng);
    let mut slots: Vec<Option<T>> = items.drain(..).map(Some).collect();
    items.extend(order.into_iter().filter_map(|i| slots[i].take()));
}

/// One answer as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShuffledAnswer {
    /// Text from the active answer set.
    pub display_text: String,
    /// Position of this answer in the question's answer arrays.
    pub original_index: usize,
    /// Whether this is the correct option.
    pub is_correct: bool,
}

/// Memoized presentation order of a question's answers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PresentationOrder {
    /// No order has been drawn yet.
    #[default]
    Unshuffled,
    /// The drawn permutation, as original indices in display order.
    Shuffled(Vec<usize>),
}

impl PresentationOrder {
    /// Draws the permutation on first call and returns the memoized one on
    /// every later call. `rng` is not touched once shuffled.
    pub fn ensure(&mut self, len: usize, rng: &mut dyn DeterministicRng) -> &[usize] {
        if let Self::Unshuffled = self {
            *self = Self::Shuffled(fisher_yates(len, rng));
        }
        self.permutation().unwrap_or(&[])
    }

    /// Returns the permutation if it has been drawn.
    #[must_use]
    pub fn permutation(&self) -> Option<&[usize]> {
        match self {
            Self::Unshuffled => None,
            Self::Shuffled(order) => Some(order),
        }
    }

    /// Whether the permutation has been drawn.
    #[must_use]
    pub fn is_shuffled(&self) -> bool {
        matches!(self, Self::Shuffled(_))
    }
}

/// Replays `order` against `answers`, flagging `correct_index`.
#[must_use]
pub fn replay(order: &[usize], answers: &[String], correct_index: usize) -> Vec<ShuffledAnswer> {
    order
        .iter()
        .filter_map(|&original_index| {
            answers.get(original_index).map(|text| ShuffledAnswer {
                display_text: text.clone(),
                original_index,
                is_correct: original_index == correct_index,
            })
        })
        .collect()
}

/// An answer carried through the ingestion shuffle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerTriple {
    /// Text in the display language (equal to `original` when untranslated).
    pub translated: String,
    /// Text in the source language.
    pub original: String,
    /// Whether this is the correct option.
    pub is_correct: bool,
}

impl AnswerTriple {
    /// Zips index-aligned translated and original answers into triples.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::MisalignedTranslation` if the lengths differ and
    /// `RecordError::CorrectIndexOutOfRange` if `correct_index` is invalid.
    pub fn zip(
        translated: Vec<String>,
        original: Vec<String>,
        correct_index: usize,
    ) -> Result<Vec<Self>, RecordError> {
        if translated.len() != original.len() {
            return Err(RecordError::MisalignedTranslation {
                expected: original.len(),
                actual: translated.len(),
            });
        }
        if correct_index >= original.len() {
            return Err(RecordError::CorrectIndexOutOfRange {
                index: correct_index,
                len: original.len(),
            });
        }
        Ok(translated
            .into_iter()
            .zip(original)
            .enumerate()
            .map(|(i, (translated, original))| Self {
                translated,
                original,
                is_correct: i == correct_index,
            })
            .collect())
    }
}

/// Output of the ingestion shuffle: two aligned arrays and the new correct
/// index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedAnswers {
    /// Display-language answers in shuffled order.
    pub answers: Vec<String>,
    /// Source-language answers, aligned with `answers`.
    pub original_answers: Vec<String>,
    /// Where the correct answer landed.
    pub correct_index: usize,
}

/// Shuffles triples once and locates the correct entry's new position.
///
/// # Errors
///
/// Returns `RecordError::NoCorrectAnswer` if no triple is flagged correct.
pub fn ingest_shuffle(
    mut triples: Vec<AnswerTriple>,
    rng: &mut dyn DeterministicRng,
) -> Result<IngestedAnswers, RecordError> {
    shuffle_in_place(&mut triples, rng);
    let correct_index = triples
        .iter()
        .position(|t| t.is_correct)
        .ok_or(RecordError::NoCorrectAnswer)?;
    let (answers, original_answers) = triples
        .into_iter()
        .map(|t| (t.translated, t.original))
        .unzip();
    Ok(IngestedAnswers {
        answers,
        original_answers,
        correct_index,
    })
}

//! Builds `Question` entities from raw records.

use sha2::{Digest, Sha256};

use crate::error::RecordError;
use crate::question::{Question, QuestionParts};
use crate::record::RawQuestionRecord;
use crate::translation::TranslatedContent;

/// Number of hex characters kept from the content hash.
pub const ID_LENGTH: usize = 16;

/// Derives the question id from its original (untranslated) text.
///
/// Identical texts produce identical ids; callers treat those as duplicates.
#[must_use]
pub fn question_id(original_text: &str) -> String {
    let mut id = hex::encode(Sha256::digest(original_text.as_bytes()));
    id.truncate(ID_LENGTH);
    id
}

/// Normalizes raw records into `Question` entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionFactory;

impl QuestionFactory {
    /// Builds an untranslated question: working text equals original text.
    ///
    /// # Errors
    ///
    /// Returns a `RecordError` if the record breaks the answer invariants.
    pub fn create(self, record: RawQuestionRecord) -> Result<Question, RecordError> {
        record.validate()?;
        Ok(Question::from_parts(QuestionParts {
            id: question_id(&record.text),
            text: record.text.clone(),
            original_text: record.text,
            answers: record.answers.clone(),
            original_answers: record.answers,
            correct_index: record.correct_index,
            category: record.category,
            difficulty: record.difficulty,
            provenance: record.provenance,
        }))
    }

    /// Builds a translated question. `content.answers` must be index-aligned
    /// with `record.answers`.
    ///
    /// # Errors
    ///
    /// Returns a `RecordError` if the record breaks the answer invariants or
    /// the translated answers have a different length.
    pub fn create_translated(
        self,
        record: RawQuestionRecord,
        content: TranslatedContent,
    ) -> Result<Question, RecordError> {
        record.validate()?;
        if content.answers.len() != record.answers.len() {
            return Err(RecordError::MisalignedTranslation {
                expected: record.answers.len(),
                actual: content.answers.len(),
            });
        }
        Ok(Question::from_parts(QuestionParts {
            id: question_id(&record.text),
            text: content.text,
            original_text: record.text,
            answers: content.answers,
            original_answers: record.answers,
            correct_index: record.correct_index,
            category: record.category,
            difficulty: record.difficulty,
            provenance: record.provenance,
        }))
    }
}

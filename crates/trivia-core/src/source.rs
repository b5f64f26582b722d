//! Question source abstraction.

use async_trait::async_trait;

use crate::category::Category;
use crate::difficulty::Difficulty;
use crate::error::SourceError;
use crate::record::RawQuestionRecord;

/// A tier that supplies raw question records.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch up to `amount` records for the category and difficulty.
    ///
    /// An `Ok` with an empty vector is allowed; the pipeline treats it like
    /// an unavailable source.
    async fn fetch_raw(
        &self,
        category: Category,
        difficulty: Difficulty,
        amount: usize,
    ) -> Result<Vec<RawQuestionRecord>, SourceError>;

    /// Name of the source, for logs.
    fn name(&self) -> &'static str;
}

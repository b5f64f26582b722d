//! Test sources: fake `QuestionSource` implementations for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use trivia_core::category::Category;
use trivia_core::difficulty::Difficulty;
use trivia_core::error::SourceError;
use trivia_core::record::{Provenance, RawQuestionRecord};
use trivia_core::source::QuestionSource;

/// Builds a four-answer record with the correct answer first.
#[must_use]
pub fn sample_record(
    text: &str,
    category: Category,
    difficulty: Difficulty,
    provenance: Provenance,
) -> RawQuestionRecord {
    RawQuestionRecord {
        text: text.to_owned(),
        answers: vec![
            format!("{text} (correct)"),
            format!("{text} (wrong 1)"),
            format!("{text} (wrong 2)"),
            format!("{text} (wrong 3)"),
        ],
        correct_index: 0,
        category,
        difficulty,
        provenance,
    }
}

/// A source that returns a fixed set of records (truncated to `amount`) and
/// counts how often it was called.
#[derive(Debug)]
pub struct StaticSource {
    records: Vec<RawQuestionRecord>,
    calls: AtomicUsize,
}

impl StaticSource {
    /// Create a source that always returns `records`.
    #[must_use]
    pub fn new(records: Vec<RawQuestionRecord>) -> Self {
        Self {
            records,
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a source that succeeds with no records.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Number of `fetch_raw` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuestionSource for StaticSource {
    async fn fetch_raw(
        &self,
        _category: Category,
        _difficulty: Difficulty,
        amount: usize,
    ) -> Result<Vec<RawQuestionRecord>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.iter().take(amount).cloned().collect())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// A source that always fails with the configured error.
#[derive(Debug)]
pub struct FailingSource {
    error: SourceError,
    calls: AtomicUsize,
}

impl FailingSource {
    /// Create a source that fails with `error`.
    #[must_use]
    pub fn new(error: SourceError) -> Self {
        Self {
            error,
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a source that fails as an unreachable network would.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::new(SourceError::SourceUnavailable("connection refused".to_owned()))
    }

    /// Number of `fetch_raw` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuestionSource for FailingSource {
    async fn fetch_raw(
        &self,
        _category: Category,
        _difficulty: Difficulty,
        _amount: usize,
    ) -> Result<Vec<RawQuestionRecord>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

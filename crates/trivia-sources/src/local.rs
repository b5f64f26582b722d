//! Local fallback source.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{debug, instrument, warn};
use trivia_core::category::Category;
use trivia_core::difficulty::Difficulty;
use trivia_core::error::SourceError;
use trivia_core::record::{Provenance, RawQuestionRecord};
use trivia_core::rng::DeterministicRng;
use trivia_core::shuffle::{fisher_yates, shuffle_in_place};
use trivia_core::source::QuestionSource;

use crate::bank::{BankEntry, FallbackBank};

/// Serves records from the in-memory fallback bank.
///
/// Selection order is randomized and each selected record has its answers
/// shuffled once here, so the pipeline applies no ingestion shuffle to
/// fallback records.
pub struct LocalSource {
    bank: FallbackBank,
    rng: Arc<Mutex<dyn DeterministicRng + Send>>,
}

impl LocalSource {
    /// Creates a source over `bank`, drawing randomness from `rng`.
    #[must_use]
    pub fn new(bank: FallbackBank, rng: Arc<Mutex<dyn DeterministicRng + Send>>) -> Self {
        Self { bank, rng }
    }

    /// The bank this source serves from.
    #[must_use]
    pub fn bank(&self) -> &FallbackBank {
        &self.bank
    }

    /// Synchronous selection; the RNG lock never spans an await.
    fn select(
        &self,
        category: Category,
        difficulty: Difficulty,
        amount: usize,
    ) -> Result<Vec<RawQuestionRecord>, SourceError> {
        let entries = self.bank.entries(category);
        if entries.is_empty() {
            return Err(SourceError::NoFallbackAvailable(category));
        }

        let mut candidates: Vec<&BankEntry> = entries
            .iter()
            .filter(|entry| entry.difficulty == difficulty)
            .collect();
        if candidates.is_empty() {
            debug!(%category, %difficulty, "no fallback entries at this difficulty, using any");
            candidates = entries.iter().collect();
        }

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| SourceError::SourceUnavailable(format!("RNG mutex poisoned: {e}")))?;

        shuffle_in_place(&mut candidates, &mut *rng);

        Ok(candidates
            .into_iter()
            .take(amount)
            .filter_map(|entry| shuffled_record(entry, category, &mut *rng))
            .collect())
    }
}

impl std::fmt::Debug for LocalSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSource")
            .field("entries", &self.bank.len())
            .finish_non_exhaustive()
    }
}

/// Builds a fallback record with its answers shuffled and the correct index
/// moved along.
fn shuffled_record(
    entry: &BankEntry,
    category: Category,
    rng: &mut dyn DeterministicRng,
) -> Option<RawQuestionRecord> {
    let order = fisher_yates(entry.answers.len(), rng);
    let Some(correct_index) = order.iter().position(|&i| i == entry.correct) else {
        warn!(question = %entry.question, "fallback entry has no valid correct answer");
        return None;
    };

    Some(RawQuestionRecord {
        text: entry.question.clone(),
        answers: order.iter().map(|&i| entry.answers[i].clone()).collect(),
        correct_index,
        category,
        difficulty: entry.difficulty,
        provenance: Provenance::Fallback,
    })
}

#[async_trait]
impl QuestionSource for LocalSource {
    #[instrument(skip(self), fields(source = "local"))]
    async fn fetch_raw(
        &self,
        category: Category,
        difficulty: Difficulty,
        amount: usize,
    ) -> Result<Vec<RawQuestionRecord>, SourceError> {
        self.select(category, difficulty, amount)
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

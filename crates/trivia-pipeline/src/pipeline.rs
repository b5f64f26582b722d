//! Question pipeline orchestration.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::join_all;
use tracing::{debug, info, instrument, warn};
use trivia_core::category::Category;
use trivia_core::difficulty::Difficulty;
use trivia_core::error::{RecordError, SourceError};
use trivia_core::factory::QuestionFactory;
use trivia_core::question::Question;
use trivia_core::record::{Provenance, RawQuestionRecord};
use trivia_core::rng::DeterministicRng;
use trivia_core::shuffle::{AnswerTriple, ingest_shuffle};
use trivia_core::source::QuestionSource;
use trivia_core::translation::TranslatedContent;
use trivia_translation::TextTranslator;
use uuid::Uuid;

use crate::config::PipelineConfig;

/// Per-question progress, logged at debug level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Record received from a source.
    Sourcing,
    /// Text and answers are being translated.
    Translating,
    /// Ingestion shuffle applied.
    Shuffled,
    /// `Question` built.
    Ready,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            Self::Sourcing => "sourcing",
            Self::Translating => "translating",
            Self::Shuffled => "shuffled",
            Self::Ready => "ready",
        };
        f.write_str(stage)
    }
}

/// Questions produced by one request, with the tier that served them.
#[derive(Debug, Clone)]
pub struct QuestionBatch {
    /// Ready questions, in source order.
    pub questions: Vec<Question>,
    /// Which tier answered the request.
    pub provenance: Provenance,
}

impl QuestionBatch {
    /// Provenance tag of the serving tier.
    #[must_use]
    pub fn source(&self) -> &'static str {
        self.provenance.as_str()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Fetches raw records from the remote tier (or the local one when the
/// remote fails) and turns them into questions.
pub struct QuestionPipeline {
    remote: Arc<dyn QuestionSource>,
    local: Arc<dyn QuestionSource>,
    translator: Option<Arc<TextTranslator>>,
    rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    factory: QuestionFactory,
    config: PipelineConfig,
}

impl QuestionPipeline {
    /// Creates a pipeline without a translator.
    #[must_use]
    pub fn new(
        remote: Arc<dyn QuestionSource>,
        local: Arc<dyn QuestionSource>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            remote,
            local,
            translator: None,
            rng,
            factory: QuestionFactory,
            config,
        }
    }

    /// Injects the translator used for remote questions.
    #[must_use]
    pub fn with_translator(mut self, translator: Arc<TextTranslator>) -> Self {
        self.translator = Some(translator);
        self
    }

    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fetches up to `amount` questions for `category`.
    ///
    /// `amount` is clamped into `[1, max_amount]`. Translation failures
    /// degrade single questions to their source text and never fail the
    /// batch.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::NoFallbackAvailable` when neither tier produced a
    /// usable question. Errors raised by the local tier are returned as is.
    #[instrument(skip(self), fields(request_id = %Uuid::new_v4()))]
    pub async fn fetch_questions(
        &self,
        category: Category,
        difficulty: Difficulty,
        amount: usize,
    ) -> Result<QuestionBatch, SourceError> {
        let amount = self.config.clamp_amount(amount);
        let (records, provenance) = self.source_records(category, difficulty, amount).await?;

        let questions: Vec<Question> = join_all(
            records
                .into_iter()
                .map(|record| self.build_question(record)),
        )
        .await
        .into_iter()
        .flatten()
        .collect();

        if questions.is_empty() {
            warn!(%category, "no usable questions after processing");
            return Err(SourceError::NoFallbackAvailable(category));
        }

        info!(
            %category,
            count = questions.len(),
            source = provenance.as_str(),
            "questions ready"
        );
        Ok(QuestionBatch {
            questions,
            provenance,
        })
    }

    async fn source_records(
        &self,
        category: Category,
        difficulty: Difficulty,
        amount: usize,
    ) -> Result<(Vec<RawQuestionRecord>, Provenance), SourceError> {
        match self.remote.fetch_raw(category, difficulty, amount).await {
            Ok(records) if !records.is_empty() => {
                info!(source = self.remote.name(), count = records.len(), "remote tier answered");
                return Ok((records, Provenance::Remote));
            }
            Ok(_) => warn!(source = self.remote.name(), "remote tier returned nothing, using fallback"),
            Err(SourceError::InvalidCategory(name)) => {
                warn!(source = self.remote.name(), category = %name, "remote tier has no code for category, using fallback");
            }
            Err(e) => {
                warn!(source = self.remote.name(), error = %e, "remote tier unavailable, using fallback");
            }
        }

        let records = self.local.fetch_raw(category, difficulty, amount).await?;
        if records.is_empty() {
            return Err(SourceError::NoFallbackAvailable(category));
        }
        info!(source = self.local.name(), count = records.len(), "fallback tier answered");
        Ok((records, Provenance::Fallback))
    }

    fn active_translator(&self) -> Option<&TextTranslator> {
        self.translator
            .as_deref()
            .filter(|_| self.config.translation_enabled)
    }

    async fn build_question(&self, record: RawQuestionRecord) -> Option<Question> {
        debug!(stage = %PipelineStage::Sourcing, source = record.provenance.as_str());

        let built = match record.provenance {
            Provenance::Fallback => self.factory.create(record),
            Provenance::Remote => {
                let content = match self.active_translator() {
                    Some(translator) => {
                        debug!(stage = %PipelineStage::Translating);
                        let content = translator
                            .translate_question(&record.text, &record.answers, Some(record.category))
                            .await;
                        (!content.degraded).then_some(content)
                    }
                    None => None,
                };
                self.ingest(record, content)
            }
        };

        match built {
            Ok(question) => {
                debug!(stage = %PipelineStage::Ready, id = question.id());
                Some(question)
            }
            Err(e) => {
                warn!(error = %e, "dropping malformed record");
                None
            }
        }
    }

    /// Ingestion shuffle for a remote record, carrying translated and
    /// original answers together so they stay index-aligned.
    fn ingest(
        &self,
        record: RawQuestionRecord,
        content: Option<TranslatedContent>,
    ) -> Result<Question, RecordError> {
        let (text, translated) = match content {
            Some(content) => (Some(content.text), content.answers),
            None => (None, record.answers.clone()),
        };
        let triples = AnswerTriple::zip(translated, record.answers.clone(), record.correct_index)?;

        let ingested = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            ingest_shuffle(triples, &mut *rng)?
        };
        debug!(stage = %PipelineStage::Shuffled, correct_index = ingested.correct_index);

        let shuffled = RawQuestionRecord {
            answers: ingested.original_answers,
            correct_index: ingested.correct_index,
            ..record
        };
        match text {
            Some(text) => self.factory.create_translated(
                shuffled,
                TranslatedContent {
                    text,
                    answers: ingested.answers,
                    degraded: false,
                },
            ),
            None => self.factory.create(shuffled),
        }
    }
}

impl fmt::Debug for QuestionPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionPipeline")
            .field("remote", &self.remote.name())
            .field("local", &self.local.name())
            .field("translator", &self.translator)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

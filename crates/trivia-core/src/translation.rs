//! Translation provider abstraction and lifecycle events.

use async_trait::async_trait;
use thiserror::Error;

use crate::category::Category;

/// Failure of a single call to a translation provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// The request could not be sent or the connection dropped.
    #[error("translation request failed: {0}")]
    Network(String),

    /// The endpoint answered with a non-success HTTP status.
    #[error("translation endpoint returned HTTP {0}")]
    Status(u16),

    /// The service answered but reported a failure in its payload.
    #[error("translation rejected by service: {0}")]
    Rejected(String),

    /// The response body did not have the expected shape.
    #[error("translation response could not be decoded: {0}")]
    Decode(String),
}

/// A remote (or fake) translation backend. Implementations are fallible;
/// the caching translator turns failures into degraded results.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate a single string into the configured target language.
    async fn translate(&self, text: &str) -> Result<String, TranslationError>;

    /// Name of the provider, for logs.
    fn name(&self) -> &str;
}

/// Emitted before a provider call is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationStarted {
    /// Source text.
    pub text: String,
    /// Category of the question being translated, if known.
    pub category: Option<Category>,
}

/// Emitted when a translation is available, from the provider or the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationCompleted {
    /// Source text.
    pub text: String,
    /// Translated text.
    pub translated: String,
    /// Category of the question being translated, if known.
    pub category: Option<Category>,
    /// Whether the result came from the cache.
    pub cached: bool,
}

/// Emitted when a provider call failed and the source text was kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationFailed {
    /// Source text, returned unchanged to the caller.
    pub text: String,
    /// Category of the question being translated, if known.
    pub category: Option<Category>,
    /// Provider error message.
    pub reason: String,
}

/// Translation lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationEvent {
    /// A provider call is about to be made.
    Started(TranslationStarted),
    /// A translation was produced.
    Completed(TranslationCompleted),
    /// A translation degraded to the source text.
    Failed(TranslationFailed),
}

/// Receives translation lifecycle events.
pub trait TranslationObserver: Send + Sync {
    /// Called synchronously for every event.
    fn on_event(&self, event: &TranslationEvent);
}

/// Translated question content, index-aligned with the source record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedContent {
    /// Translated question text.
    pub text: String,
    /// Translated answers, in the record's original order.
    pub answers: Vec<String>,
    /// Whether any string fell back to its source text.
    pub degraded: bool,
}

//! Memoizing, never-failing translator.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, instrument, warn};
use trivia_core::category::Category;
use trivia_core::translation::{
    TranslatedContent, TranslationCompleted, TranslationEvent, TranslationFailed,
    TranslationObserver, TranslationProvider, TranslationStarted,
};

use crate::cache::TranslationCache;

/// Outcome of translating one string.
struct Lookup {
    text: String,
    degraded: bool,
}

/// Translates question text through a provider, caching every success.
///
/// Provider failures never reach the caller: the source text is returned
/// unchanged and a `TranslationEvent::Failed` is emitted. Failures are not
/// cached, so a later call for the same text tries the provider again.
pub struct TextTranslator {
    provider: Arc<dyn TranslationProvider>,
    cache: Arc<TranslationCache>,
    observers: Vec<Arc<dyn TranslationObserver>>,
}

impl TextTranslator {
    /// Creates a translator over `provider`, sharing `cache`.
    #[must_use]
    pub fn new(provider: Arc<dyn TranslationProvider>, cache: Arc<TranslationCache>) -> Self {
        Self {
            provider,
            cache,
            observers: Vec::new(),
        }
    }

    /// Registers an observer for translation lifecycle events.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn TranslationObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// The cache shared by this translator.
    #[must_use]
    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// Translates `text`, returning it unchanged if the provider fails.
    pub async fn translate(&self, text: &str) -> String {
        self.lookup(text, None).await.text
    }

    /// Like `translate`, tagging emitted events with `category`.
    pub async fn translate_with_category(&self, text: &str, category: Category) -> String {
        self.lookup(text, Some(category)).await.text
    }

    /// Translates a question and its answers concurrently.
    ///
    /// Answers come back in their original order. Each distinct string is
    /// sent to the provider at most once. `degraded` is set when any string
    /// fell back to its source text.
    #[instrument(skip_all, fields(category = ?category, answers = answers.len()))]
    pub async fn translate_question(
        &self,
        text: &str,
        answers: &[String],
        category: Option<Category>,
    ) -> TranslatedContent {
        let mut distinct: Vec<&str> = Vec::with_capacity(answers.len() + 1);
        for candidate in std::iter::once(text).chain(answers.iter().map(String::as_str)) {
            if !distinct.contains(&candidate) {
                distinct.push(candidate);
            }
        }

        let results = join_all(distinct.iter().map(|s| self.lookup(s, category))).await;
        let degraded = results.iter().any(|r| r.degraded);
        let translated: HashMap<&str, String> = distinct
            .into_iter()
            .zip(results)
            .map(|(source, lookup)| (source, lookup.text))
            .collect();

        let resolve = |source: &str| {
            translated
                .get(source)
                .cloned()
                .unwrap_or_else(|| source.to_owned())
        };

        if degraded {
            warn!("question translation degraded, keeping source text where it failed");
        }

        TranslatedContent {
            text: resolve(text),
            answers: answers.iter().map(|a| resolve(a)).collect(),
            degraded,
        }
    }

    async fn lookup(&self, text: &str, category: Option<Category>) -> Lookup {
        if text.trim().is_empty() {
            return Lookup {
                text: text.to_owned(),
                degraded: false,
            };
        }

        if let Some(cached) = self.cache.get(text) {
            self.notify(&TranslationEvent::Completed(TranslationCompleted {
                text: text.to_owned(),
                translated: cached.clone(),
                category,
                cached: true,
            }));
            return Lookup {
                text: cached,
                degraded: false,
            };
        }

        self.notify(&TranslationEvent::Started(TranslationStarted {
            text: text.to_owned(),
            category,
        }));

        match self.provider.translate(text).await {
            Ok(translated) => {
                debug!(provider = self.provider.name(), "translated");
                self.cache.insert(text, translated.clone());
                self.notify(&TranslationEvent::Completed(TranslationCompleted {
                    text: text.to_owned(),
                    translated: translated.clone(),
                    category,
                    cached: false,
                }));
                Lookup {
                    text: translated,
                    degraded: false,
                }
            }
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "translation failed, keeping source text");
                self.notify(&TranslationEvent::Failed(TranslationFailed {
                    text: text.to_owned(),
                    category,
                    reason: e.to_string(),
                }));
                Lookup {
                    text: text.to_owned(),
                    degraded: true,
                }
            }
        }
    }

    fn notify(&self, event: &TranslationEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }
}

impl std::fmt::Debug for TextTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextTranslator")
            .field("provider", &self.provider.name())
            .field("cached", &self.cache.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

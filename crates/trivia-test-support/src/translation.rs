//! Test translation: mock provider and recording observer.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use trivia_core::translation::{
    TranslationError, TranslationEvent, TranslationObserver, TranslationProvider,
};

/// Mock translation modes for testing different scenarios.
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append a suffix: "hello" → "hello [es]".
    Suffix(String),

    /// Use predefined mappings; unknown texts get the `[es]` suffix.
    Mappings(HashMap<String, String>),

    /// Fail for the listed texts, suffix everything else.
    FailOn(HashSet<String>),

    /// Fail every call, as an unreachable endpoint would.
    Error(String),

    /// Return input unchanged.
    NoOp,
}

/// A provider with deterministic output that counts its calls.
#[derive(Debug)]
pub struct MockTranslationProvider {
    mode: MockMode,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl MockTranslationProvider {
    /// Create a provider with the given mode.
    #[must_use]
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Shorthand for `MockMode::Suffix("[es]")`.
    #[must_use]
    pub fn suffix() -> Self {
        Self::new(MockMode::Suffix("[es]".to_owned()))
    }

    /// Shorthand for a provider that always fails.
    #[must_use]
    pub fn unreachable() -> Self {
        Self::new(MockMode::Error("connection refused".to_owned()))
    }

    /// Number of provider calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every text passed to `translate`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationProvider for MockTranslationProvider {
    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(text.to_owned());

        match &self.mode {
            MockMode::Suffix(suffix) => Ok(format!("{text} {suffix}")),
            MockMode::Mappings(map) => Ok(map
                .get(text)
                .cloned()
                .unwrap_or_else(|| format!("{text} [es]"))),
            MockMode::FailOn(failing) if failing.contains(text) => {
                Err(TranslationError::Network("simulated failure".to_owned()))
            }
            MockMode::FailOn(_) => Ok(format!("{text} [es]")),
            MockMode::Error(msg) => Err(TranslationError::Network(msg.clone())),
            MockMode::NoOp => Ok(text.to_owned()),
        }
    }

    fn name(&self) -> &str {
        "Mock Translator"
    }
}

/// Observer that records every event it receives.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<TranslationEvent>>,
}

impl RecordingObserver {
    /// Create an observer with no recorded events.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all recorded events.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn events(&self) -> Vec<TranslationEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl TranslationObserver for RecordingObserver {
    fn on_event(&self, event: &TranslationEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

//! Observer that forwards translation events to `tracing`.

use tracing::{debug, warn};
use trivia_core::translation::{TranslationEvent, TranslationObserver};

/// Logs every translation event; failures at warn, the rest at debug.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TranslationObserver for TracingObserver {
    fn on_event(&self, event: &TranslationEvent) {
        match event {
            TranslationEvent::Started(started) => {
                debug!(category = ?started.category, chars = started.text.len(), "translation started");
            }
            TranslationEvent::Completed(completed) => {
                debug!(
                    category = ?completed.category,
                    cached = completed.cached,
                    "translation completed"
                );
            }
            TranslationEvent::Failed(failed) => {
                warn!(category = ?failed.category, reason = %failed.reason, "translation failed");
            }
        }
    }
}

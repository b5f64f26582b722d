//! Session-scoped translation cache.

use dashmap::DashMap;

/// Source text → translated text, shared by every question in a session.
///
/// Append-only with no eviction. Concurrent inserts for the same key are
/// last-write-wins.
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: DashMap<String, String>,
}

impl TranslationCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached translation of `text`, if any.
    #[must_use]
    pub fn get(&self, text: &str) -> Option<String> {
        self.entries.get(text).map(|entry| entry.value().clone())
    }

    /// Stores a translation, replacing any previous value.
    pub fn insert(&self, text: impl Into<String>, translated: impl Into<String>) {
        self.entries.insert(text.into(), translated.into());
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_inserted_value() {
        // Arrange
        let cache = TranslationCache::new();

        // Act
        cache.insert("Hello", "Hola");

        // Assert
        assert_eq!(cache.get("Hello").as_deref(), Some("Hola"));
        assert_eq!(cache.get("hello"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_insert_same_key_is_last_write_wins() {
        let cache = TranslationCache::new();

        cache.insert("Paris", "París");
        cache.insert("Paris", "Paris");

        assert_eq!(cache.get("Paris").as_deref(), Some("Paris"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_new_cache_is_empty() {
        assert!(TranslationCache::new().is_empty());
    }
}

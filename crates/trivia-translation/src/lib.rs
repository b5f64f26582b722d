//! Trivia Translation: machine translation of question text.
//!
//! `TextTranslator` wraps a `TranslationProvider` with a shared cache and
//! never fails: when the provider errors, the source text comes back
//! unchanged and observers are told about it.

pub mod cache;
pub mod mymemory;
pub mod observer;
pub mod translator;

pub use cache::TranslationCache;
pub use mymemory::{MyMemoryConfig, MyMemoryProvider};
pub use observer::TracingObserver;
pub use translator::TextTranslator;

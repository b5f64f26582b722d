//! Shared test mocks and utilities for the trivia question pipeline.

mod rng;
mod source;
mod translation;

pub use rng::{MockRng, SequenceRng};
pub use source::{FailingSource, StaticSource, sample_record};
pub use translation::{MockMode, MockTranslationProvider, RecordingObserver};

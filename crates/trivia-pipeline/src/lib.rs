//! Trivia Pipeline: turns a category request into ready questions.
//!
//! The remote tier is asked first; when it is unavailable or comes back
//! empty the local tier answers instead. Remote questions are translated
//! and shuffled once before they become `Question` values.

pub mod config;
pub mod pipeline;

pub use config::PipelineConfig;
pub use pipeline::{PipelineStage, QuestionBatch, QuestionPipeline};

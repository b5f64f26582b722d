//! Shared application state.

use std::fmt;
use std::sync::{Arc, Mutex};

use trivia_core::rng::DeterministicRng;
use trivia_pipeline::QuestionPipeline;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Question pipeline, shared by every request.
    pub pipeline: Arc<QuestionPipeline>,
    /// RNG for presentation shuffles.
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        pipeline: Arc<QuestionPipeline>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    ) -> Self {
        Self { pipeline, rng }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}

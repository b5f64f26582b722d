//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;
use trivia_core::category::Category;
use trivia_core::difficulty::Difficulty;
use trivia_core::record::Provenance;
use trivia_core::rng::DeterministicRng;
use trivia_core::source::QuestionSource;
use trivia_pipeline::{PipelineConfig, QuestionPipeline};
use trivia_sources::{FallbackBank, LocalSource};
use trivia_test_support::{
    FailingSource, MockRng, MockTranslationProvider, StaticSource, sample_record,
};
use trivia_translation::{TextTranslator, TranslationCache};

use trivia_api::state::AppState;

fn shared_rng() -> Arc<Mutex<dyn DeterministicRng + Send>> {
    Arc::new(Mutex::new(MockRng))
}

/// Build the full app router over the given remote tier, the built-in
/// fallback bank, and a suffixing mock translator.
pub fn build_app_with_remote(remote: Arc<dyn QuestionSource>) -> Router {
    let rng = shared_rng();
    let local = LocalSource::new(FallbackBank::builtin(), rng.clone());
    let translator = TextTranslator::new(
        Arc::new(MockTranslationProvider::suffix()),
        Arc::new(TranslationCache::new()),
    );
    let pipeline = QuestionPipeline::new(remote, Arc::new(local), rng.clone(), PipelineConfig::default())
        .with_translator(Arc::new(translator));

    trivia_api::app(AppState::new(Arc::new(pipeline), rng))
}

/// App whose remote tier serves two English history questions.
pub fn build_test_app() -> Router {
    build_app_with_remote(Arc::new(StaticSource::new(vec![
        sample_record(
            "Who was the first emperor of Rome?",
            Category::Historia,
            Difficulty::Medium,
            Provenance::Remote,
        ),
        sample_record(
            "In which year did the Berlin Wall fall?",
            Category::Historia,
            Difficulty::Medium,
            Provenance::Remote,
        ),
    ])))
}

/// App whose remote tier is unreachable.
pub fn build_offline_app() -> Router {
    build_app_with_remote(Arc::new(FailingSource::unavailable()))
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

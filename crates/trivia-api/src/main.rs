//! Trivia question API server entry point.

use std::error::Error;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;
use trivia_api::config::AppConfig;
use trivia_api::error::AppError;
use trivia_api::state::AppState;
use trivia_core::rng::{DeterministicRng, SystemRng};
use trivia_pipeline::QuestionPipeline;
use trivia_sources::{FallbackBank, LocalSource, RemoteSource};
use trivia_translation::{MyMemoryProvider, TextTranslator, TracingObserver, TranslationCache};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting trivia question API server");

    let config = AppConfig::from_env()?;

    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = match config.rng_seed {
        Some(seed) => {
            tracing::info!(seed, "using seeded RNG");
            Arc::new(Mutex::new(SystemRng::seeded(seed)))
        }
        None => Arc::new(Mutex::new(SystemRng::new())),
    };

    // Build the two question tiers.
    let remote = RemoteSource::connect(config.remote.clone())
        .await
        .map_err(AppError::from)?;
    let bank = FallbackBank::load(&config.fallback_bank_path);
    let local = LocalSource::new(bank, rng.clone());
    tracing::info!(entries = local.bank().len(), "fallback bank ready");

    let mut pipeline = QuestionPipeline::new(
        Arc::new(remote),
        Arc::new(local),
        rng.clone(),
        config.pipeline.clone(),
    );

    if config.pipeline.translation_enabled {
        let provider = MyMemoryProvider::new(config.translation.clone()).map_err(AppError::from)?;
        tracing::info!(langpair = provider.language_pair(), "translation enabled");
        let translator = TextTranslator::new(Arc::new(provider), Arc::new(TranslationCache::new()))
            .with_observer(Arc::new(TracingObserver));
        pipeline = pipeline.with_translator(Arc::new(translator));
    } else {
        tracing::info!("translation disabled");
    }

    let app = trivia_api::app(AppState::new(Arc::new(pipeline), rng));

    // Start server.
    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(AppError::from)?;

    axum::serve(listener, app).await?;

    Ok(())
}

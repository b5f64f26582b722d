//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use trivia_pipeline::PipelineConfig;
use trivia_sources::RemoteSourceConfig;
use trivia_translation::MyMemoryConfig;

use crate::error::AppError;

/// Default location of the fallback bank file.
pub const DEFAULT_FALLBACK_BANK_PATH: &str = "data/fallback-bank.json";

/// Everything the binary needs to wire the pipeline.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub remote: RemoteSourceConfig,
    pub translation: MyMemoryConfig,
    pub pipeline: PipelineConfig,
    pub fallback_bank_path: PathBuf,
    /// Seed for replayable sessions; OS entropy when absent.
    pub rng_seed: Option<u64>,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, falling back to defaults for
    /// anything unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let port = parse_var(&lookup, "PORT")?.unwrap_or(3000);
        let timeout = parse_var::<u64>(&lookup, "HTTP_TIMEOUT_SECS")?.map(Duration::from_secs);

        let mut remote = RemoteSourceConfig::default();
        if let Some(url) = lookup("TRIVIA_API_URL") {
            remote.base_url = url;
        }
        if let Some(url) = lookup("TRIVIA_TOKEN_URL") {
            remote.token_url = url;
        }

        let mut translation = MyMemoryConfig::default();
        if let Some(url) = lookup("TRANSLATION_URL") {
            translation.endpoint = url;
        }
        if let Some(pair) = lookup("TRANSLATION_LANGPAIR") {
            if !pair.contains('|') {
                return Err(AppError::Config(format!(
                    "TRANSLATION_LANGPAIR must look like `en|es`, got `{pair}`"
                )));
            }
            translation.language_pair = pair;
        }

        if let Some(timeout) = timeout {
            remote.timeout = timeout;
            translation.timeout = timeout;
        }

        let mut pipeline = PipelineConfig::default();
        if let Some(value) = lookup("TRANSLATION_ENABLED") {
            pipeline.translation_enabled = parse_bool("TRANSLATION_ENABLED", &value)?;
        }

        let fallback_bank_path = lookup("FALLBACK_BANK_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_FALLBACK_BANK_PATH), PathBuf::from);
        let rng_seed = parse_var(&lookup, "RNG_SEED")?;

        Ok(Self {
            host,
            port,
            remote,
            translation,
            pipeline,
            fallback_bank_path,
            rng_seed,
        })
    }

    /// The address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host:port` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("{key} is invalid: {e}")))
        })
        .transpose()
}

fn parse_bool(key: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::Config(format!("{key} must be a boolean, got `{other}`"))),
    }
}

//! MyMemory translation API provider.
//!
//! Sends `GET <endpoint>?q=<text>&langpair=<pair>` and reads
//! `responseData.translatedText`. A call only counts as successful when the
//! HTTP status is 2xx and the payload's `responseStatus` is 200; the service
//! sends that field as a number on success and as a string on some errors.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};
use trivia_core::translation::{TranslationError, TranslationProvider};

/// Public MyMemory endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

/// English to Spanish.
pub const DEFAULT_LANGUAGE_PAIR: &str = "en|es";

/// Configuration for `MyMemoryProvider`.
#[derive(Debug, Clone)]
pub struct MyMemoryConfig {
    /// Translation endpoint.
    pub endpoint: String,
    /// `source|target` language pair.
    pub language_pair: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for MyMemoryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            language_pair: DEFAULT_LANGUAGE_PAIR.to_owned(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
    #[serde(default)]
    response_status: serde_json::Value,
    #[serde(default)]
    response_details: Option<String>,
    #[serde(default)]
    response_data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    translated_text: Option<String>,
}

/// Reads `responseStatus` whether it arrived as a number or a string.
fn status_code(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Extracts the translation from a decoded response body.
fn translated_text(response: MyMemoryResponse) -> Result<String, TranslationError> {
    if status_code(&response.response_status) != Some(200) {
        let reason = response
            .response_details
            .filter(|details| !details.is_empty())
            .unwrap_or_else(|| format!("responseStatus {}", response.response_status));
        return Err(TranslationError::Rejected(reason));
    }

    response
        .response_data
        .and_then(|data| data.translated_text)
        .ok_or_else(|| TranslationError::Decode("missing responseData.translatedText".to_owned()))
}

/// Translation provider backed by the MyMemory HTTP API.
#[derive(Clone)]
pub struct MyMemoryProvider {
    config: MyMemoryConfig,
    client: reqwest::Client,
}

impl MyMemoryProvider {
    /// Creates a provider with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `TranslationError::Network` if the HTTP client cannot be built.
    pub fn new(config: MyMemoryConfig) -> Result<Self, TranslationError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TranslationError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// The configured language pair.
    #[must_use]
    pub fn language_pair(&self) -> &str {
        &self.config.language_pair
    }
}

impl std::fmt::Debug for MyMemoryProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MyMemoryProvider")
            .field("endpoint", &self.config.endpoint)
            .field("language_pair", &self.config.language_pair)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TranslationProvider for MyMemoryProvider {
    #[instrument(skip(self), fields(langpair = %self.config.language_pair))]
    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        if text.trim().is_empty() {
            return Ok(text.to_owned());
        }

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[("q", text), ("langpair", self.config.language_pair.as_str())])
            .send()
            .await
            .map_err(|e| TranslationError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::Status(status.as_u16()));
        }

        let body: MyMemoryResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::Decode(e.to_string()))?;

        let translated = translated_text(body)?;
        debug!(chars = translated.len(), "translation received");
        Ok(translated)
    }

    fn name(&self) -> &str {
        "MyMemory"
    }
}

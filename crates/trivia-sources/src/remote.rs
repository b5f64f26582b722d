//! Remote trivia API source.
//!
//! Requests go to an Open Trivia DB compatible endpoint. A session token is
//! requested once at connect time so the API does not hand out the same
//! question twice; without one, requests still work, just without
//! de-duplication.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use trivia_core::category::Category;
use trivia_core::difficulty::Difficulty;
use trivia_core::error::SourceError;
use trivia_core::record::{Provenance, RawQuestionRecord};
use trivia_core::source::QuestionSource;

use crate::html::decode_entities;

/// Default question endpoint.
pub const DEFAULT_API_URL: &str = "https://opentdb.com/api.php";

/// Default session token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://opentdb.com/api_token.php";

/// Maps board categories to the API's integer category codes.
#[must_use]
pub fn default_category_codes() -> HashMap<Category, u32> {
    HashMap::from([
        (Category::Historia, 23),
        (Category::Ciencia, 17),
        (Category::Geografia, 22),
        (Category::Deportes, 21),
        (Category::Arte, 25),
        (Category::Entretenimiento, 11),
    ])
}

/// Configuration for `RemoteSource`.
#[derive(Debug, Clone)]
pub struct RemoteSourceConfig {
    /// Question endpoint.
    pub base_url: String,
    /// Session token endpoint.
    pub token_url: String,
    /// Category → API code table. Categories missing here fail fast.
    pub category_codes: HashMap<Category, u32>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for RemoteSourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
            token_url: DEFAULT_TOKEN_URL.to_owned(),
            category_codes: default_category_codes(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// API-level response codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResponseCode {
    Success,
    NoResults,
    InvalidParameter,
    TokenNotFound,
    TokenExhausted,
    RateLimited,
    Unknown(u8),
}

impl From<u8> for ResponseCode {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::Success,
            1 => Self::NoResults,
            2 => Self::InvalidParameter,
            3 => Self::TokenNotFound,
            4 => Self::TokenExhausted,
            5 => Self::RateLimited,
            other => Self::Unknown(other),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<ApiResult>,
}

#[derive(Debug, Deserialize)]
struct ApiResult {
    question: String,
    correct_answer: String,
    #[serde(default)]
    incorrect_answers: Vec<String>,
    #[serde(default)]
    difficulty: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    response_code: u8,
    #[serde(default)]
    token: Option<String>,
}

/// Question source backed by the remote trivia API.
#[derive(Debug)]
pub struct RemoteSource {
    config: RemoteSourceConfig,
    client: reqwest::Client,
    token: RwLock<Option<String>>,
}

impl RemoteSource {
    /// Creates a source without a session token.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::SourceUnavailable` if the HTTP client cannot be
    /// built.
    pub fn new(config: RemoteSourceConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                SourceError::SourceUnavailable(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            config,
            client,
            token: RwLock::new(None),
        })
    }

    /// Creates a source and requests a session token. Failing to get a token
    /// is logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::SourceUnavailable` if the HTTP client cannot be
    /// built.
    pub async fn connect(config: RemoteSourceConfig) -> Result<Self, SourceError> {
        let source = Self::new(config)?;
        source.acquire_token().await;
        Ok(source)
    }

    /// The current session token, if one was obtained.
    #[must_use]
    pub fn session_token(&self) -> Option<String> {
        self.token.read().ok().and_then(|token| token.clone())
    }

    /// Requests a fresh session token. Returns whether one was stored.
    #[instrument(skip(self))]
    pub async fn acquire_token(&self) -> bool {
        match self.token_command(&[("command", "request")]).await {
            Ok(token) => {
                info!("obtained trivia session token");
                self.store_token(Some(token));
                true
            }
            Err(e) => {
                warn!(error = %e, "session token unavailable, questions may repeat");
                false
            }
        }
    }

    /// Resets the current session token so the API serves the full pool
    /// again. Without a token this requests a new one instead.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::SourceUnavailable` if the reset call fails.
    #[instrument(skip(self))]
    pub async fn reset_token(&self) -> Result<(), SourceError> {
        let Some(current) = self.session_token() else {
            return if self.acquire_token().await {
                Ok(())
            } else {
                Err(SourceError::SourceUnavailable(
                    "no session token to reset".to_owned(),
                ))
            };
        };

        let token = self
            .token_command(&[("command", "reset"), ("token", current.as_str())])
            .await?;
        info!("session token reset");
        self.store_token(Some(token));
        Ok(())
    }

    fn store_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = token;
        }
    }

    async fn token_command(&self, params: &[(&str, &str)]) -> Result<String, SourceError> {
        let response = self
            .client
            .get(&self.config.token_url)
            .query(params)
            .send()
            .await
            .map_err(|e| SourceError::SourceUnavailable(format!("token request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(SourceError::SourceUnavailable(format!(
                "token endpoint returned HTTP {}",
                response.status()
            )));
        }

        let body: TokenResponse = response.json().await.map_err(|e| {
            SourceError::SourceUnavailable(format!("token response could not be decoded: {e}"))
        })?;

        match (ResponseCode::from(body.response_code), body.token) {
            (ResponseCode::Success, Some(token)) if !token.is_empty() => Ok(token),
            (code, _) => Err(SourceError::SourceUnavailable(format!(
                "token endpoint answered {code:?}"
            ))),
        }
    }

    fn category_code(&self, category: Category) -> Result<u32, SourceError> {
        self.config
            .category_codes
            .get(&category)
            .copied()
            .ok_or_else(|| SourceError::InvalidCategory(category.to_string()))
    }

    /// Reacts to token-related response codes so later requests are
    /// de-duplicated again. Best-effort: failures are only logged.
    async fn recover_token(&self, code: ResponseCode) {
        let recovered = match code {
            ResponseCode::TokenNotFound => self.acquire_token().await,
            ResponseCode::TokenExhausted => self.reset_token().await.is_ok(),
            _ => return,
        };
        if !recovered {
            warn!(?code, "could not recover session token");
            self.store_token(None);
        }
    }
}

#[async_trait]
impl QuestionSource for RemoteSource {
    #[instrument(skip(self), fields(source = "remote"))]
    async fn fetch_raw(
        &self,
        category: Category,
        difficulty: Difficulty,
        amount: usize,
    ) -> Result<Vec<RawQuestionRecord>, SourceError> {
        let code = self.category_code(category)?;

        let mut params = vec![
            ("amount", amount.to_string()),
            ("category", code.to_string()),
            ("difficulty", difficulty.as_str().to_owned()),
            ("type", "multiple".to_owned()),
        ];
        if let Some(token) = self.session_token() {
            params.push(("token", token));
        }

        debug!(category_code = code, "requesting questions");

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| SourceError::SourceUnavailable(format!("question request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(SourceError::SourceUnavailable(format!(
                "question endpoint returned HTTP {}",
                response.status()
            )));
        }

        let body: ApiResponse = response.json().await.map_err(|e| {
            SourceError::SourceUnavailable(format!("question response could not be decoded: {e}"))
        })?;

        let response_code = ResponseCode::from(body.response_code);
        if response_code != ResponseCode::Success {
            self.recover_token(response_code).await;
        }

        records_from_response(body, category, difficulty)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

/// Turns a decoded API payload into unshuffled records with the correct
/// answer first.
fn records_from_response(
    body: ApiResponse,
    category: Category,
    requested: Difficulty,
) -> Result<Vec<RawQuestionRecord>, SourceError> {
    let code = ResponseCode::from(body.response_code);
    if code != ResponseCode::Success {
        return Err(SourceError::SourceUnavailable(format!(
            "trivia API answered {code:?}"
        )));
    }

    let records = body
        .results
        .into_iter()
        .filter_map(|result| {
            let mut answers = Vec::with_capacity(result.incorrect_answers.len() + 1);
            answers.push(decode_entities(&result.correct_answer));
            answers.extend(result.incorrect_answers.iter().map(|a| decode_entities(a)));

            let record = RawQuestionRecord {
                text: decode_entities(&result.question),
                answers,
                correct_index: 0,
                category,
                difficulty: result
                    .difficulty
                    .as_deref()
                    .map_or(requested, Difficulty::parse_lenient),
                provenance: Provenance::Remote,
            };

            match record.validate() {
                Ok(()) => Some(record),
                Err(e) => {
                    warn!(error = %e, question = %record.text, "skipping malformed API result");
                    None
                }
            }
        })
        .collect();

    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use super::*;

    type Params = HashMap<String, String>;

    fn parse(json: &str) -> ApiResponse {
        serde_json::from_str(json).unwrap()
    }

    /// In-process stand-in for the trivia API that records every query string.
    #[derive(Clone, Default)]
    struct StubApi {
        token_calls: Arc<Mutex<Vec<Params>>>,
        question_calls: Arc<Mutex<Vec<Params>>>,
        response_codes: Arc<Mutex<VecDeque<u8>>>,
        issued: Arc<AtomicUsize>,
        token_endpoint_down: Arc<AtomicBool>,
    }

    impl StubApi {
        fn answer_next_with(&self, code: u8) {
            self.response_codes.lock().unwrap().push_back(code);
        }

        fn token_calls(&self) -> Vec<Params> {
            self.token_calls.lock().unwrap().clone()
        }

        fn question_calls(&self) -> Vec<Params> {
            self.question_calls.lock().unwrap().clone()
        }
    }

    async fn stub_token(State(stub): State<StubApi>, Query(params): Query<Params>) -> Json<Value> {
        stub.token_calls.lock().unwrap().push(params.clone());
        if stub.token_endpoint_down.load(Ordering::SeqCst) {
            return Json(json!({ "response_code": 3 }));
        }
        match params.get("command").map(String::as_str) {
            Some("request") => {
                let n = stub.issued.fetch_add(1, Ordering::SeqCst) + 1;
                Json(json!({ "response_code": 0, "token": format!("tok-{n}") }))
            }
            Some("reset") => Json(json!({ "response_code": 0, "token": "tok-reset" })),
            _ => Json(json!({ "response_code": 2 })),
        }
    }

    async fn stub_questions(
        State(stub): State<StubApi>,
        Query(params): Query<Params>,
    ) -> Json<Value> {
        stub.question_calls.lock().unwrap().push(params);
        let code = stub.response_codes.lock().unwrap().pop_front().unwrap_or(0);
        if code != 0 {
            return Json(json!({ "response_code": code, "results": [] }));
        }
        Json(json!({
            "response_code": 0,
            "results": [{
                "type": "multiple",
                "difficulty": "medium",
                "category": "History",
                "question": "Which treaty ended the Thirty Years&#039; War?",
                "correct_answer": "Peace of Westphalia",
                "incorrect_answers": ["Treaty of Utrecht", "Treaty of Versailles", "Peace of Augsburg"]
            }]
        }))
    }

    async fn serve_stub(stub: StubApi) -> RemoteSourceConfig {
        let app = Router::new()
            .route("/api.php", get(stub_questions))
            .route("/api_token.php", get(stub_token))
            .with_state(stub);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        RemoteSourceConfig {
            base_url: format!("http://{addr}/api.php"),
            token_url: format!("http://{addr}/api_token.php"),
            timeout: Duration::from_secs(5),
            ..RemoteSourceConfig::default()
        }
    }

    /// Config pointing at a closed local port so nothing leaves the machine.
    fn offline_config() -> RemoteSourceConfig {
        RemoteSourceConfig {
            base_url: "http://127.0.0.1:9/api.php".to_owned(),
            token_url: "http://127.0.0.1:9/api_token.php".to_owned(),
            category_codes: default_category_codes(),
            timeout: Duration::from_secs(2),
        }
    }

    #[test]
    fn test_records_from_response_decodes_and_puts_correct_first() {
        // Arrange
        let body = parse(
            r#"{
                "response_code": 0,
                "results": [{
                    "type": "multiple",
                    "difficulty": "medium",
                    "category": "History",
                    "question": "Who was the first emperor of Rome?",
                    "correct_answer": "Augustus",
                    "incorrect_answers": ["Nero", "Caligula", "Julius Caesar"]
                }, {
                    "question": "Which city hosted the &quot;Congress of Vienna&quot;?",
                    "correct_answer": "Vienna",
                    "incorrect_answers": ["Paris", "Berlin", "Rome"]
                }]
            }"#,
        );

        // Act
        let records = records_from_response(body, Category::Historia, Difficulty::Hard).unwrap();

        // Assert
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].answers, vec!["Augustus", "Nero", "Caligula", "Julius Caesar"]);
        assert_eq!(records[0].correct_index, 0);
        assert_eq!(records[0].difficulty, Difficulty::Medium);
        assert_eq!(records[0].provenance, Provenance::Remote);
        assert_eq!(records[1].text, "Which city hosted the \"Congress of Vienna\"?");
        assert_eq!(records[1].difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_nonzero_response_code_is_unavailable() {
        let body = parse(r#"{"response_code": 1, "results": []}"#);

        let result = records_from_response(body, Category::Arte, Difficulty::Easy);

        assert!(matches!(result, Err(SourceError::SourceUnavailable(_))));
    }

    #[test]
    fn test_malformed_results_are_skipped() {
        let body = parse(
            r#"{"response_code": 0, "results": [
                {"question": "Lonely?", "correct_answer": "Yes", "incorrect_answers": []},
                {"question": "Fine?", "correct_answer": "Yes", "incorrect_answers": ["No"]}
            ]}"#,
        );

        let records = records_from_response(body, Category::Arte, Difficulty::Easy).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "Fine?");
    }

    #[test]
    fn test_response_codes_map() {
        assert_eq!(ResponseCode::from(0), ResponseCode::Success);
        assert_eq!(ResponseCode::from(4), ResponseCode::TokenExhausted);
        assert_eq!(ResponseCode::from(42), ResponseCode::Unknown(42));
    }

    #[tokio::test]
    async fn test_unmapped_category_fails_fast() {
        // Arrange
        let mut config = offline_config();
        config.category_codes.remove(&Category::Deportes);
        let source = RemoteSource::new(config).unwrap();

        // Act
        let result = source
            .fetch_raw(Category::Deportes, Difficulty::Easy, 5)
            .await;

        // Assert
        assert_eq!(
            result.unwrap_err(),
            SourceError::InvalidCategory("deportes".to_owned())
        );
    }

    #[tokio::test]
    async fn test_connect_without_token_is_not_fatal() {
        let source = RemoteSource::connect(offline_config()).await.unwrap();

        assert!(source.session_token().is_none());
    }

    #[tokio::test]
    async fn test_unreachable_api_is_source_unavailable() {
        let source = RemoteSource::new(offline_config()).unwrap();

        let result = source
            .fetch_raw(Category::Historia, Difficulty::Medium, 1)
            .await;

        assert!(matches!(result, Err(SourceError::SourceUnavailable(_))));
    }

    #[tokio::test]
    async fn test_connect_stores_token_and_sends_it_with_requests() {
        // Arrange
        let stub = StubApi::default();
        let source = RemoteSource::connect(serve_stub(stub.clone()).await)
            .await
            .unwrap();

        // Act
        let records = source
            .fetch_raw(Category::Historia, Difficulty::Medium, 1)
            .await
            .unwrap();

        // Assert
        assert_eq!(source.session_token().as_deref(), Some("tok-1"));
        assert_eq!(stub.token_calls()[0]["command"], "request");

        let query = &stub.question_calls()[0];
        assert_eq!(query["token"], "tok-1");
        assert_eq!(query["amount"], "1");
        assert_eq!(query["category"], "23");
        assert_eq!(query["difficulty"], "medium");
        assert_eq!(query["type"], "multiple");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "Which treaty ended the Thirty Years' War?");
        assert_eq!(records[0].correct_answer(), Some("Peace of Westphalia"));
        assert_eq!(records[0].answers.len(), 4);
        assert_eq!(records[0].provenance, Provenance::Remote);
    }

    #[tokio::test]
    async fn test_exhausted_token_is_reset() {
        // Arrange
        let stub = StubApi::default();
        let source = RemoteSource::connect(serve_stub(stub.clone()).await)
            .await
            .unwrap();
        stub.answer_next_with(4);

        // Act
        let exhausted = source
            .fetch_raw(Category::Ciencia, Difficulty::Hard, 2)
            .await;
        let next = source
            .fetch_raw(Category::Ciencia, Difficulty::Hard, 2)
            .await;

        // Assert
        assert!(matches!(exhausted, Err(SourceError::SourceUnavailable(_))));
        assert!(next.is_ok());

        let reset = &stub.token_calls()[1];
        assert_eq!(reset["command"], "reset");
        assert_eq!(reset["token"], "tok-1");
        assert_eq!(source.session_token().as_deref(), Some("tok-reset"));
        assert_eq!(stub.question_calls()[1]["token"], "tok-reset");
    }

    #[tokio::test]
    async fn test_unknown_token_is_replaced_with_a_fresh_one() {
        // Arrange
        let stub = StubApi::default();
        let source = RemoteSource::connect(serve_stub(stub.clone()).await)
            .await
            .unwrap();
        stub.answer_next_with(3);

        // Act
        let result = source.fetch_raw(Category::Arte, Difficulty::Easy, 1).await;

        // Assert
        assert!(matches!(result, Err(SourceError::SourceUnavailable(_))));
        let calls = stub.token_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1]["command"], "request");
        assert_eq!(source.session_token().as_deref(), Some("tok-2"));
    }

    #[tokio::test]
    async fn test_failed_token_recovery_clears_token() {
        // Arrange
        let stub = StubApi::default();
        let source = RemoteSource::connect(serve_stub(stub.clone()).await)
            .await
            .unwrap();
        stub.token_endpoint_down.store(true, Ordering::SeqCst);
        stub.answer_next_with(4);

        // Act
        let _ = source.fetch_raw(Category::Deportes, Difficulty::Medium, 1).await;
        source
            .fetch_raw(Category::Deportes, Difficulty::Medium, 1)
            .await
            .unwrap();

        // Assert
        assert!(source.session_token().is_none());
        assert!(!stub.question_calls()[1].contains_key("token"));
    }
}

//! Question batch endpoint.

use std::sync::PoisonError;

use axum::extract::{Query, State};
use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use trivia_core::category::Category;
use trivia_core::difficulty::Difficulty;
use trivia_core::question::Question;
use trivia_core::rng::DeterministicRng;
use trivia_core::shuffle::ShuffledAnswer;

use crate::error::ApiError;
use crate::state::AppState;

/// Query string for GET /api/v1/questions.
#[derive(Debug, Deserialize)]
pub struct QuestionsQuery {
    /// Board category name, e.g. `historia`.
    pub category: String,
    /// `easy`, `medium` or `hard`; anything else counts as medium.
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Batch size; clamped by the pipeline.
    #[serde(default)]
    pub amount: Option<usize>,
}

/// A question as sent to the game client.
#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub id: String,
    pub text: String,
    pub original_text: String,
    /// Answers in presentation order.
    pub answers: Vec<ShuffledAnswer>,
    /// Original-language answers in the same order as `answers`.
    pub original_answers: Vec<ShuffledAnswer>,
    pub category: Category,
    pub difficulty: Difficulty,
    pub time_limit_secs: u64,
    pub points: u32,
    pub source: &'static str,
}

impl QuestionView {
    /// Draws the question's presentation order and snapshots it for the wire
    /// in both display languages.
    fn render(mut question: Question, rng: &mut dyn DeterministicRng) -> Self {
        let answers = question.shuffled_answers(rng);
        question.toggle_original_text();
        let original_answers = question.shuffled_answers(rng);
        question.toggle_original_text();
        Self {
            id: question.id().to_owned(),
            text: question.current_text().to_owned(),
            original_text: question.original_text().to_owned(),
            answers,
            original_answers,
            category: question.category(),
            difficulty: question.difficulty(),
            time_limit_secs: question.time_limit().as_secs(),
            points: question.points(),
            source: question.source(),
        }
    }
}

/// Response body for GET /api/v1/questions.
#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    /// Tier that served the batch: `remote` or `fallback`.
    pub source: &'static str,
    pub questions: Vec<QuestionView>,
}

/// GET /api/v1/questions
#[instrument(skip(state, query), fields(category = %query.category))]
async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<QuestionsQuery>,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let category: Category = query.category.parse()?;
    let difficulty = query
        .difficulty
        .as_deref()
        .map_or(Difficulty::Medium, Difficulty::parse_lenient);
    let amount = query
        .amount
        .unwrap_or(state.pipeline.config().default_amount);

    let batch = state
        .pipeline
        .fetch_questions(category, difficulty, amount)
        .await?;
    let source = batch.source();

    let questions: Vec<QuestionView> = {
        let mut rng = state.rng.lock().unwrap_or_else(PoisonError::into_inner);
        batch
            .questions
            .into_iter()
            .map(|question| QuestionView::render(question, &mut *rng))
            .collect()
    };

    info!(count = questions.len(), source, "serving questions");

    Ok(Json(QuestionsResponse { source, questions }))
}

/// Returns the router for question batches.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_questions))
}

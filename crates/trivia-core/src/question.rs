//! The question entity handed to the game loop.

use std::time::Duration;

use crate::category::Category;
use crate::difficulty::Difficulty;
use crate::record::Provenance;
use crate::rng::DeterministicRng;
use crate::shuffle::{PresentationOrder, ShuffledAnswer, replay};

/// A fully formed trivia question.
///
/// Content is fixed at construction. The only mutations are `mark_as_used`,
/// `toggle_original_text`, and the first call to `shuffled_answers`, which
/// draws the presentation order once for the lifetime of the value.
#[derive(Debug, Clone)]
pub struct Question {
    id: String,
    text: String,
    original_text: String,
    answers: Vec<String>,
    original_answers: Vec<String>,
    correct_index: usize,
    category: Category,
    difficulty: Difficulty,
    provenance: Provenance,
    time_limit: Duration,
    points: u32,
    used: bool,
    showing_original: bool,
    presentation: PresentationOrder,
}

/// Constructor arguments, filled in by `QuestionFactory`.
#[derive(Debug)]
pub(crate) struct QuestionParts {
    pub id: String,
    pub text: String,
    pub original_text: String,
    pub answers: Vec<String>,
    pub original_answers: Vec<String>,
    pub correct_index: usize,
    pub category: Category,
    pub difficulty: Difficulty,
    pub provenance: Provenance,
}

impl Question {
    pub(crate) fn from_parts(parts: QuestionParts) -> Self {
        let scoring = parts.difficulty.scoring();
        Self {
            id: parts.id,
            text: parts.text,
            original_text: parts.original_text,
            answers: parts.answers,
            original_answers: parts.original_answers,
            correct_index: parts.correct_index,
            category: parts.category,
            difficulty: parts.difficulty,
            provenance: parts.provenance,
            time_limit: scoring.time_limit,
            points: scoring.points,
            used: false,
            showing_original: false,
            presentation: PresentationOrder::Unshuffled,
        }
    }

    /// Content-derived identifier (hash of the original text).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Working text, translated when a translation was applied.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Source-language text.
    #[must_use]
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// Working answers, aligned with `original_answers`.
    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Source-language answers.
    #[must_use]
    pub fn original_answers(&self) -> &[String] {
        &self.original_answers
    }

    /// Index of the correct option in both answer arrays.
    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Provenance tag: `"remote"` or `"fallback"`.
    #[must_use]
    pub fn source(&self) -> &'static str {
        self.provenance.as_str()
    }

    #[must_use]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Whether the question has been consumed in this session.
    #[must_use]
    pub fn is_used(&self) -> bool {
        self.used
    }

    /// Marks the question consumed. There is no way back.
    pub fn mark_as_used(&mut self) {
        self.used = true;
    }

    /// Whether the original-language text is on display.
    #[must_use]
    pub fn showing_original(&self) -> bool {
        self.showing_original
    }

    /// Flips between translated and original presentation and returns the
    /// new state.
    pub fn toggle_original_text(&mut self) -> bool {
        self.showing_original = !self.showing_original;
        self.showing_original
    }

    /// Whether the working text differs from the original.
    #[must_use]
    pub fn is_translated(&self) -> bool {
        self.text != self.original_text || self.answers != self.original_answers
    }

    /// Text for the current display state.
    #[must_use]
    pub fn current_text(&self) -> &str {
        if self.showing_original {
            &self.original_text
        } else {
            &self.text
        }
    }

    /// Answers for the current display state, in stored order.
    #[must_use]
    pub fn current_answers(&self) -> &[String] {
        if self.showing_original {
            &self.original_answers
        } else {
            &self.answers
        }
    }

    /// Correct answer in the current display state.
    #[must_use]
    pub fn correct_answer(&self) -> &str {
        self.current_answers()
            .get(self.correct_index)
            .map_or("", String::as_str)
    }

    /// Whether the option at `original_index` is the correct one.
    #[must_use]
    pub fn is_correct(&self, original_index: usize) -> bool {
        original_index == self.correct_index
    }

    /// Answers in presentation order.
    ///
    /// The order is drawn from `rng` on the first call and replayed on every
    /// later call against the current answer set, so toggling the display
    /// language never reorders the options.
    pub fn shuffled_answers(&mut self, rng: &mut dyn DeterministicRng) -> Vec<ShuffledAnswer> {
        let order = self.presentation.ensure(self.answers.len(), rng).to_vec();
        replay(&order, self.current_answers(), self.correct_index)
    }

    /// Presentation permutation, once drawn.
    #[must_use]
    pub fn shuffled_order(&self) -> Option<&[usize]> {
        self.presentation.permutation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::QuestionFactory;
    use crate::record::RawQuestionRecord;
    use crate::rng::SystemRng;
    use crate::translation::TranslatedContent;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    fn translated_question() -> Question {
        let record = RawQuestionRecord {
            text: "Which planet is known as the Red Planet?".to_owned(),
            answers: strings(&["Venus", "Mars", "Jupiter", "Saturn"]),
            correct_index: 1,
            category: Category::Ciencia,
            difficulty: Difficulty::Hard,
            provenance: Provenance::Remote,
        };
        let content = TranslatedContent {
            text: "¿Qué planeta es conocido como el planeta rojo?".to_owned(),
            answers: strings(&["Venus", "Marte", "Júpiter", "Saturno"]),
            degraded: false,
        };
        QuestionFactory.create_translated(record, content).unwrap()
    }

    #[test]
    fn test_invariants_hold_across_toggles() {
        let mut question = translated_question();
        for _ in 0..5 {
            assert_eq!(question.answers().len(), question.original_answers().len());
            assert!(question.correct_index() < question.answers().len());
            question.toggle_original_text();
        }
    }

    #[test]
    fn test_toggle_twice_restores_display() {
        // Arrange
        let mut question = translated_question();
        let initial_flag = question.showing_original();
        let initial_text = question.current_text().to_owned();
        let initial_answers = question.current_answers().to_vec();

        // Act
        assert!(question.toggle_original_text());
        assert_eq!(question.current_text(), question.original_text());
        assert!(!question.toggle_original_text());

        // Assert
        assert_eq!(question.showing_original(), initial_flag);
        assert_eq!(question.current_text(), initial_text);
        assert_eq!(question.current_answers(), initial_answers.as_slice());
    }

    #[test]
    fn test_shuffled_answers_are_stable_across_calls_and_toggles() {
        // Arrange
        let mut question = translated_question();
        let mut rng = SystemRng::seeded(5);
        assert!(question.shuffled_order().is_none());

        // Act
        let first: Vec<usize> = question
            .shuffled_answers(&mut rng)
            .iter()
            .map(|a| a.original_index)
            .collect();
        question.toggle_original_text();
        let toggled = question.shuffled_answers(&mut rng);
        let second: Vec<usize> = toggled.iter().map(|a| a.original_index).collect();

        // Assert
        assert_eq!(first, second);
        assert_eq!(question.shuffled_order(), Some(first.as_slice()));
        let correct = toggled.iter().find(|a| a.is_correct).unwrap();
        assert_eq!(correct.display_text, "Mars");
        assert_eq!(correct.original_index, question.correct_index());
    }

    #[test]
    fn test_shuffled_answers_follow_display_language() {
        let mut question = translated_question();
        let mut rng = SystemRng::seeded(8);

        let translated = question.shuffled_answers(&mut rng);
        let correct = translated.iter().find(|a| a.is_correct).unwrap();
        assert_eq!(correct.display_text, "Marte");
        assert_eq!(question.correct_answer(), "Marte");

        question.toggle_original_text();
        assert_eq!(question.correct_answer(), "Mars");
    }

    #[test]
    fn test_mark_as_used_does_not_touch_display_state() {
        let mut question = translated_question();
        question.toggle_original_text();

        question.mark_as_used();

        assert!(question.is_used());
        assert!(question.showing_original());
        assert_eq!(question.correct_index(), 1);
    }

    #[test]
    fn test_derived_fields_follow_difficulty() {
        let question = translated_question();
        assert_eq!(question.time_limit(), Duration::from_secs(20));
        assert_eq!(question.points(), 30);
        assert_eq!(question.source(), "remote");
        assert!(question.is_translated());
        assert!(question.is_correct(1));
        assert!(!question.is_correct(0));
    }
}

//! Session-scoped question deck.

use std::collections::HashSet;

use crate::question::Question;

/// Questions handed to one game session.
///
/// Duplicates (same id) are rejected for the whole session, including ids
/// that were already drawn, so a question is never asked twice.
#[derive(Debug, Default)]
pub struct QuestionDeck {
    questions: Vec<Question>,
    seen_ids: HashSet<String>,
}

impl QuestionDeck {
    /// Creates an empty deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds questions, skipping ids already seen this session. Returns how
    /// many were added.
    pub fn extend(&mut self, questions: impl IntoIterator<Item = Question>) -> usize {
        let mut added = 0;
        for question in questions {
            if self.seen_ids.insert(question.id().to_owned()) {
                self.questions.push(question);
                added += 1;
            }
        }
        added
    }

    /// Returns the next unused question and marks it used.
    pub fn draw(&mut self) -> Option<&mut Question> {
        let question = self.questions.iter_mut().find(|q| !q.is_used())?;
        question.mark_as_used();
        Some(question)
    }

    /// Number of questions not yet drawn.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.questions.iter().filter(|q| !q.is_used()).count()
    }

    /// Total number of questions held, drawn or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

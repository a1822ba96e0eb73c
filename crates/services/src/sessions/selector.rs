use std::collections::HashSet;

use quiz_core::model::{Question, QuestionId};
use quiz_core::{QuestionBank, Randomizer};

/// What a session start can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSelection {
    /// Unseen questions in randomized order; never empty.
    Ready(Vec<Question>),
    /// The bank has questions but every one is already in the history.
    AllCompleted,
    /// The bank has no questions at all.
    NoData,
}

impl SessionSelection {
    #[must_use]
    pub fn total(&self) -> usize {
        match self {
            Self::Ready(questions) => questions.len(),
            Self::AllCompleted | Self::NoData => 0,
        }
    }
}

/// Pick every bank question not yet in `completed`, then shuffle.
///
/// Repeated sessions shrink the unseen set until it is empty.
pub fn select_session(
    bank: &QuestionBank,
    completed: &HashSet<QuestionId>,
    rng: &mut Randomizer,
) -> SessionSelection {
    if bank.is_empty() {
        return SessionSelection::NoData;
    }

    let mut available: Vec<Question> = bank
        .questions()
        .iter()
        .filter(|q| !completed.contains(q.id()))
        .cloned()
        .collect();

    if available.is_empty() {
        return SessionSelection::AllCompleted;
    }

    rng.shuffle_in_place(&mut available);
    tracing::debug!(
        available = available.len(),
        completed = bank.len() - available.len(),
        "selected session questions"
    );
    SessionSelection::Ready(available)
}

use serde::Serialize;

use quiz_core::model::{QuestionId, QuestionKind};

use super::service::{QuizSession, SessionPhase};

/// Current question as the presentation layer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub id: QuestionId,
    pub module: String,
    pub category: String,
    pub kind: QuestionKind,
    pub prompt: String,
    /// Only revealed once the question is checked.
    pub explanation: Option<String>,
}

/// One presented option, addressed by its position in `SessionView::options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    /// `A`, `B`, `C`, ... by presented position.
    pub label: char,
    pub text: String,
    pub selected: bool,
    /// Only revealed once the question is checked.
    pub correct: Option<bool>,
}

/// Snapshot of everything a front end needs to render a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub phase: &'static str,
    pub question: Option<QuestionView>,
    pub options: Vec<OptionView>,
    pub checked: bool,
    pub correct: Option<bool>,
    pub score: usize,
    /// 1-based; 0 when idle.
    pub position: usize,
    pub total: usize,
    /// Set once the session is finished.
    pub percentage: Option<u8>,
}

impl SessionView {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        let checked = session.phase() == SessionPhase::Checked;
        let question = session.current_question().map(|q| QuestionView {
            id: q.id().clone(),
            module: q.module().to_string(),
            category: q.category().to_string(),
            kind: q.kind(),
            prompt: q.prompt().to_string(),
            explanation: checked.then(|| q.explanation().to_string()),
        });

        let options = session
            .presented_options()
            .iter()
            .zip(option_labels())
            .enumerate()
            .map(|(index, (option, label))| OptionView {
                label,
                text: option.text().to_string(),
                selected: session.selection().contains(index),
                correct: checked.then(|| option.is_correct()),
            })
            .collect();

        let progress = session.progress();
        Self {
            phase: session.phase().as_str(),
            question,
            options,
            checked,
            correct: session.verdict().map(|v| v.is_correct),
            score: progress.score,
            position: progress.position,
            total: progress.total,
            percentage: session.outcome().map(|o| o.percentage()),
        }
    }
}

/// `A`..`Z`, then `?` for anything past the alphabet.
fn option_labels() -> impl Iterator<Item = char> {
    ('A'..='Z').chain(std::iter::repeat('?'))
}

/// Converts a typed letter (case-insensitive) back to a presented index.
#[must_use]
pub fn index_for_label(label: char) -> Option<usize> {
    let upper = label.to_ascii_uppercase();
    upper
        .is_ascii_uppercase()
        .then(|| usize::from(upper as u8 - b'A'))
}

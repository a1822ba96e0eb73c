use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// How many options a learner may pick for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Exactly one selection at a time; picking replaces the previous pick.
    #[default]
    Single,
    /// Any subset of the options; picking toggles membership.
    Multi,
}

impl QuestionKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multi => "multi",
        }
    }
}

/// One answer choice in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub text: String,
    #[serde(default)]
    pub correct: bool,
}

impl QuizOption {
    #[must_use]
    pub fn new(text: impl Into<String>, correct: bool) -> Self {
        Self {
            text: text.into(),
            correct,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt is empty")]
    EmptyPrompt,

    #[error("question has no options")]
    NoOptions,

    #[error("option {index} has empty text")]
    EmptyOptionText { index: usize },

    #[error("question has no correct option")]
    NoCorrectOption,
}

/// A canonical, uniquely identified multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    module: String,
    category: String,
    kind: QuestionKind,
    prompt: String,
    options: Vec<QuizOption>,
    explanation: String,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, there are no options,
    /// an option has blank text, or no option is marked correct.
    pub fn new(
        id: QuestionId,
        category: impl Into<String>,
        kind: QuestionKind,
        prompt: impl Into<String>,
        options: Vec<QuizOption>,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }
        if let Some(index) = options.iter().position(|o| o.text.trim().is_empty()) {
            return Err(QuestionError::EmptyOptionText { index });
        }
        if !options.iter().any(|o| o.correct) {
            return Err(QuestionError::NoCorrectOption);
        }

        Ok(Self {
            module: id.module().to_string(),
            id,
            category: category.into(),
            kind,
            prompt,
            options,
            explanation: explanation.into(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[QuizOption] {
        &self.options
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Number of options marked correct.
    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|o| o.correct).count()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

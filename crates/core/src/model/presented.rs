use crate::model::question::{Question, QuizOption};
use crate::random::Randomizer;

/// An option as shown for one presentation of a question.
///
/// The learner addresses it by its shuffled position; correctness is always
/// read from the wrapped canonical option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedOption {
    option: QuizOption,
    original_index: usize,
}

impl PresentedOption {
    #[must_use]
    pub fn new(option: QuizOption, original_index: usize) -> Self {
        Self {
            option,
            original_index,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.option.text
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.option.correct
    }

    /// Position of this option in the question's canonical `options`.
    #[must_use]
    pub fn original_index(&self) -> usize {
        self.original_index
    }

    #[must_use]
    pub fn option(&self) -> &QuizOption {
        &self.option
    }
}

/// Tags each canonical option with its position, then shuffles.
///
/// Call once per presentation; option order is never reused across repeats.
pub fn present(question: &Question, rng: &mut Randomizer) -> Vec<PresentedOption> {
    let mut presented: Vec<PresentedOption> = question
        .options()
        .iter()
        .cloned()
        .enumerate()
        .map(|(index, option)| PresentedOption::new(option, index))
        .collect();
    rng.shuffle_in_place(&mut presented);
    presented
}

//! Answer grading over a presented option list.
//!
//! One rule covers both question kinds: the answer is correct iff no wrong
//! option is selected and the number of selections equals the number of
//! correct options. Single-choice questions never carry more than one
//! selection, so they fall out of the same rule.

use crate::model::{PresentedOption, Selection};

/// Result of grading one selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub is_correct: bool,
    pub correct_count: usize,
    pub selected_count: usize,
    pub selected_correct: usize,
}

/// Grade `selection` (indices into `presented`) against the presented options.
///
/// An index with no matching option counts as a wrong pick.
#[must_use]
pub fn grade(presented: &[PresentedOption], selection: &Selection) -> Verdict {
    let correct_count = presented.iter().filter(|o| o.is_correct()).count();
    let selected_count = selection.len();
    let selected_correct = selection
        .iter()
        .filter(|&i| presented.get(i).is_some_and(PresentedOption::is_correct))
        .count();

    let all_selected_correct = selected_correct == selected_count;
    let is_correct = all_selected_correct && selected_count == correct_count;

    Verdict {
        is_correct,
        correct_count,
        selected_count,
        selected_correct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuizOption;

    fn presented(flags: &[bool]) -> Vec<PresentedOption> {
        flags
            .iter()
            .enumerate()
            .map(|(i, c)| PresentedOption::new(QuizOption::new(format!("{i}"), *c), i))
            .collect()
    }

    fn pick(indices: &[usize]) -> Selection {
        indices.iter().copied().collect()
    }

    #[test]
    fn multi_requires_exact_match() {
        // A(correct), B(correct), C(wrong)
        let options = presented(&[true, true, false]);

        assert!(grade(&options, &pick(&[0, 1])).is_correct);
        assert!(!grade(&options, &pick(&[0])).is_correct);
        assert!(!grade(&options, &pick(&[0, 1, 2])).is_correct);
    }

    #[test]
    fn single_grades_the_one_pick() {
        // X(wrong), Y(correct)
        let options = presented(&[false, true]);

        assert!(grade(&options, &pick(&[1])).is_correct);
        assert!(!grade(&options, &pick(&[0])).is_correct);
    }

    #[test]
    fn empty_selection_is_incorrect() {
        let options = presented(&[true, false]);
        let verdict = grade(&options, &Selection::new());
        assert!(!verdict.is_correct);
        assert_eq!(verdict.correct_count, 1);
    }

    #[test]
    fn out_of_range_index_counts_as_wrong() {
        let options = presented(&[true]);
        let verdict = grade(&options, &pick(&[5]));
        assert!(!verdict.is_correct);
        assert_eq!(verdict.selected_correct, 0);
    }

    #[test]
    fn verdict_reports_counts() {
        let options = presented(&[true, true, false, true]);
        let verdict = grade(&options, &pick(&[0, 2]));
        assert_eq!(verdict.correct_count, 3);
        assert_eq!(verdict.selected_count, 2);
        assert_eq!(verdict.selected_correct, 1);
    }
}

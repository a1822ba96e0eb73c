use std::fmt;

use quiz_core::model::{PresentedOption, Question, Selection, SessionOutcome, present};
use quiz_core::{Randomizer, Verdict, grade};

use super::progress::SessionProgress;

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// No session running.
    Idle,
    /// Current question awaits a selection and a check.
    InProgress,
    /// Current question has been graded; explanation is visible.
    Checked,
    /// Every question has been answered.
    Finished,
}

impl SessionPhase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::InProgress => "in_progress",
            Self::Checked => "checked",
            Self::Finished => "finished",
        }
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz session state machine.
///
/// `Idle -> InProgress -> Checked -> (InProgress | Finished) -> Idle`.
/// Actions that do not fit the current phase are ignored and leave the state
/// untouched. Starting and checking go through `QuizLoopService`, which owns
/// history reads and writes.
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    score: usize,
    answered: usize,
    presented: Vec<PresentedOption>,
    selection: Selection,
    verdict: Option<Verdict>,
    phase: SessionPhase,
    rng: Randomizer,
}

impl QuizSession {
    /// Create an idle session that shuffles with `rng`.
    #[must_use]
    pub fn new(rng: Randomizer) -> Self {
        Self {
            questions: Vec::new(),
            current: 0,
            score: 0,
            answered: 0,
            presented: Vec::new(),
            selection: Selection::new(),
            verdict: None,
            phase: SessionPhase::Idle,
            rng,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.phase == SessionPhase::Idle
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Finished
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Total number of questions in this session.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Correct answers so far.
    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    /// 0-based index of the current question.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            SessionPhase::InProgress | SessionPhase::Checked => self.questions.get(self.current),
            SessionPhase::Idle | SessionPhase::Finished => None,
        }
    }

    /// Options of the current question in presented order.
    #[must_use]
    pub fn presented_options(&self) -> &[PresentedOption] {
        &self.presented
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Grade of the current question, once checked.
    #[must_use]
    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.phase == SessionPhase::Checked
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let position = match self.phase {
            SessionPhase::Idle => 0,
            SessionPhase::InProgress | SessionPhase::Checked => self.current + 1,
            SessionPhase::Finished => self.total(),
        };
        SessionProgress {
            total: self.total(),
            position,
            answered: self.answered,
            score: self.score,
            is_complete: self.is_complete(),
        }
    }

    /// Final tally; only available once finished.
    #[must_use]
    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.is_complete()
            .then(|| SessionOutcome::new(self.score, self.total()))
    }

    /// Pick or unpick a presented option of the current question.
    ///
    /// Returns `false` when not awaiting a selection or `index` is out of range.
    pub fn toggle_option(&mut self, index: usize) -> bool {
        if self.phase != SessionPhase::InProgress {
            return false;
        }
        let Some(question) = self.questions.get(self.current) else {
            return false;
        };
        self.selection
            .toggle(question.kind(), index, self.presented.len())
    }

    /// Move past a checked question.
    ///
    /// Prepares the next question, or finishes when none remain. Any other
    /// phase is left as is.
    pub fn advance(&mut self) -> SessionPhase {
        if self.phase != SessionPhase::Checked {
            return self.phase;
        }

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.prepare_current();
            self.phase = SessionPhase::InProgress;
        } else {
            self.presented.clear();
            self.selection.clear();
            self.verdict = None;
            self.phase = SessionPhase::Finished;
            tracing::info!(
                score = self.score,
                total = self.total(),
                "session finished"
            );
        }
        self.phase
    }

    /// Leave a finished session and go back to idle.
    ///
    /// Returns `false` if the session is not finished.
    pub fn return_to_menu(&mut self) -> bool {
        if self.phase != SessionPhase::Finished {
            return false;
        }
        self.reset();
        true
    }

    /// Begin with a pre-selected question list. Only valid while idle.
    pub(crate) fn begin(&mut self, questions: Vec<Question>) -> bool {
        if self.phase != SessionPhase::Idle || questions.is_empty() {
            return false;
        }
        self.reset();
        self.questions = questions;
        self.prepare_current();
        self.phase = SessionPhase::InProgress;
        true
    }

    /// Grade the current selection and move to `Checked`.
    ///
    /// Returns `None` (no state change) unless in progress with at least one
    /// option selected.
    pub(crate) fn grade_current(&mut self) -> Option<(&Question, Verdict)> {
        if self.phase != SessionPhase::InProgress || self.selection.is_empty() {
            return None;
        }
        let verdict = grade(&self.presented, &self.selection);
        if verdict.is_correct {
            self.score += 1;
        }
        self.answered += 1;
        self.verdict = Some(verdict);
        self.phase = SessionPhase::Checked;
        self.questions.get(self.current).map(|q| (q, verdict))
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Randomizer {
        &mut self.rng
    }

    fn prepare_current(&mut self) {
        self.presented = match self.questions.get(self.current) {
            Some(question) => present(question, &mut self.rng),
            None => Vec::new(),
        };
        self.selection.clear();
        self.verdict = None;
    }

    fn reset(&mut self) {
        self.questions.clear();
        self.current = 0;
        self.score = 0;
        self.answered = 0;
        self.presented.clear();
        self.selection.clear();
        self.verdict = None;
        self.phase = SessionPhase::Idle;
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(Randomizer::default())
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

use std::sync::Arc;

use quiz_core::{QuestionBank, Randomizer, Verdict};

use super::selector::{SessionSelection, select_session};
use super::service::QuizSession;
use crate::error::SessionError;
use crate::ledger::HistoryLedger;

/// Result of asking for a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A session with `total` questions is now in progress.
    Started { total: usize },
    /// Every question in the bank is already in the history; reset to continue.
    AllCompleted,
    /// The bank has no questions.
    NoData,
    /// The session was not idle; nothing changed.
    Ignored,
}

/// Result of checking the current answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The answer was graded; a correct one is already persisted.
    Graded(Verdict),
    /// Nothing selected, or not awaiting an answer; nothing changed.
    Rejected,
}

impl CheckOutcome {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Graded(v) if v.is_correct)
    }
}

/// Orchestrates session start and persisted grading over a loaded bank.
#[derive(Clone)]
pub struct QuizLoopService {
    bank: Arc<QuestionBank>,
    ledger: HistoryLedger,
    randomizer: Randomizer,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>, ledger: HistoryLedger) -> Self {
        Self {
            bank,
            ledger,
            randomizer: Randomizer::default(),
        }
    }

    /// Use `randomizer` for sessions created by `new_session`.
    #[must_use]
    pub fn with_randomizer(mut self, randomizer: Randomizer) -> Self {
        self.randomizer = randomizer;
        self
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    /// An idle session using this service's randomizer.
    #[must_use]
    pub fn new_session(&self) -> QuizSession {
        QuizSession::new(self.randomizer.clone())
    }

    /// Start a session of every question not yet in the history.
    ///
    /// With `reset_history` the history is cleared first; confirming that
    /// with the learner is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Ledger` if clearing the history fails.
    pub async fn start_session(
        &self,
        session: &mut QuizSession,
        reset_history: bool,
    ) -> Result<StartOutcome, SessionError> {
        if !session.is_idle() {
            return Ok(StartOutcome::Ignored);
        }
        if reset_history {
            self.ledger.clear().await?;
        }

        let completed = self.ledger.load().await;
        match select_session(&self.bank, &completed, session.rng_mut()) {
            SessionSelection::Ready(questions) => {
                let total = questions.len();
                session.begin(questions);
                tracing::info!(total, "session started");
                Ok(StartOutcome::Started { total })
            }
            SessionSelection::AllCompleted => {
                tracing::info!(bank = self.bank.len(), "all questions already completed");
                Ok(StartOutcome::AllCompleted)
            }
            SessionSelection::NoData => Ok(StartOutcome::NoData),
        }
    }

    /// Grade the current selection. A correct answer is written to the
    /// history before this returns.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Ledger` if persisting a correct answer fails.
    /// The session is already `Checked` at that point.
    pub async fn check_answer(
        &self,
        session: &mut QuizSession,
    ) -> Result<CheckOutcome, SessionError> {
        let Some((question, verdict)) = session.grade_current() else {
            return Ok(CheckOutcome::Rejected);
        };
        let id = question.id().clone();

        tracing::debug!(%id, correct = verdict.is_correct, "answer checked");
        if verdict.is_correct {
            self.ledger.record_correct(&id).await?;
        }
        Ok(CheckOutcome::Graded(verdict))
    }

    /// Questions of the bank already in the history.
    pub async fn completed_count(&self) -> usize {
        self.ledger.completed_count(&self.bank).await
    }
}

impl std::fmt::Debug for QuizLoopService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizLoopService")
            .field("bank_len", &self.bank.len())
            .field("ledger", &self.ledger)
            .finish_non_exhaustive()
    }
}

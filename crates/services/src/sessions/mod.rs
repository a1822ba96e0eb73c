mod progress;
mod selector;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use selector::{SessionSelection, select_session};
pub use service::{QuizSession, SessionPhase};
pub use view::{OptionView, QuestionView, SessionView, index_for_label};
pub use workflow::{CheckOutcome, QuizLoopService, StartOutcome};

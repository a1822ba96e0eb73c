mod ids;
mod presented;
mod question;
mod selection;
mod session;

pub use ids::{ID_SEPARATOR, ParseIdError, QuestionId};
pub use presented::{PresentedOption, present};
pub use question::{Question, QuestionError, QuestionKind, QuizOption};
pub use selection::Selection;
pub use session::SessionOutcome;

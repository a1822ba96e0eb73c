//! Built-in fallback dataset used when no question modules could be loaded.

use crate::bank::QuestionBank;
use crate::model::{Question, QuestionId, QuestionKind, QuizOption};

/// Module name the fallback questions are filed under.
pub const DEMO_MODULE: &str = "demo";

/// Kind, category, prompt, options, explanation.
type DemoRecord = (QuestionKind, &'static str, &'static str, Vec<QuizOption>, &'static str);

fn demo_questions() -> Vec<DemoRecord> {
    vec![
        (
            QuestionKind::Single,
            "Demo",
            "This is a demo question (preview mode). Where do the JSON module files go?",
            vec![
                QuizOption::new("In the modules directory", true),
                QuizOption::new("On the desktop", false),
                QuizOption::new("In the build output directory", false),
                QuizOption::new("Next to the database file", false),
            ],
            "The runner reads every *.json file from the configured modules directory.",
        ),
        (
            QuestionKind::Multi,
            "Architecture",
            "Which question formats does this quiz support? (Select all that apply)",
            vec![
                QuizOption::new("Single choice (single)", true),
                QuizOption::new("Multiple choice (multi)", true),
                QuizOption::new("Open-ended (essay)", false),
            ],
            "Module files may declare questions of type 'single' or 'multi'.",
        ),
    ]
}

/// The fallback bank, flagged as demo data.
#[must_use]
pub fn demo_bank() -> QuestionBank {
    let questions = demo_questions()
        .into_iter()
        .enumerate()
        .filter_map(|(index, (kind, category, prompt, options, explanation))| {
            let id = QuestionId::new(DEMO_MODULE, index);
            match Question::new(id.clone(), category, kind, prompt, options, explanation) {
                Ok(q) => Some(q),
                Err(err) => {
                    tracing::error!(%id, %err, "built-in demo question is invalid");
                    None
                }
            }
        })
        .collect();

    QuestionBank::from_questions(questions, vec![DEMO_MODULE.to_string()], true)
}

//! Line-oriented terminal front end over the quiz services.

use std::io::Write;

use quiz_core::QuestionBank;
use quiz_core::model::QuestionKind;
use services::session::index_for_label;
use services::{
    AppServices, CheckOutcome, QuizLoopService, QuizSession, SessionError, SessionPhase,
    SessionView, StartOutcome,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

type BoxError = Box<dyn std::error::Error>;

const RESET_PROMPT: &str = "Reset the history for the loaded modules?";

/// Whether the learner wants to keep going after a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Input {
    lines: Lines<BufReader<Stdin>>,
}

impl Input {
    fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// `None` on end of input.
    async fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        print!("{prompt}");
        std::io::stdout().flush()?;
        self.lines.next_line().await
    }

    async fn confirm(&mut self, question: &str) -> std::io::Result<bool> {
        let answer = self.read_line(&format!("{question} [y/N] ")).await?;
        Ok(answer.is_some_and(|a| matches!(a.trim(), "y" | "Y" | "yes")))
    }
}

/// Ask a yes/no question on stdin.
pub async fn confirm(question: &str) -> std::io::Result<bool> {
    Input::stdin().confirm(question).await
}

/// Interactive menu and session loop until the learner quits.
pub async fn run(services: &AppServices) -> Result<(), BoxError> {
    let quiz = services.quiz_loop();
    let bank = services.bank();
    let mut input = Input::stdin();
    let mut session = quiz.new_session();

    loop {
        print_menu(&bank, quiz.completed_count().await);
        let Some(choice) = input.read_line("> ").await? else {
            return Ok(());
        };

        let reset = match choice.trim() {
            "" | "s" => false,
            "r" => {
                if !input.confirm(RESET_PROMPT).await? {
                    continue;
                }
                true
            }
            "q" => return Ok(()),
            other => {
                println!("Unknown choice: {other}");
                continue;
            }
        };

        let outcome = match quiz.start_session(&mut session, reset).await {
            Ok(outcome) => outcome,
            Err(SessionError::Ledger(err)) => {
                tracing::error!(%err, "history reset failed");
                println!("Could not reset the history: {err}");
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        match outcome {
            StartOutcome::Started { .. } => {
                if play(&quiz, &mut session, &mut input).await? == Flow::Quit {
                    return Ok(());
                }
            }
            StartOutcome::AllCompleted => {
                println!();
                println!("Every question in these modules is already completed!");
                println!("Reset the history to study them again.");
            }
            StartOutcome::NoData => println!("No questions were loaded."),
            StartOutcome::Ignored => {}
        }
    }
}

fn print_menu(bank: &QuestionBank, completed: usize) {
    println!();
    println!("=== Local Quiz Runner ===");
    if bank.is_demo() {
        println!("Demo mode: no module files were found, showing built-in questions.");
    } else {
        println!("Found {} questions in your modules.", bank.len());
    }
    println!("Loaded: {}", bank.modules().join(", "));
    println!("Completed: {completed}/{}", bank.len());
    println!();
    println!("  [s] start studying   [r] reset history and start   [q] quit");
}

async fn play(
    quiz: &QuizLoopService,
    session: &mut QuizSession,
    input: &mut Input,
) -> Result<Flow, BoxError> {
    loop {
        let view = SessionView::from_session(session);
        match session.phase() {
            SessionPhase::InProgress => {
                print_question(&view);
                let Some(line) = input
                    .read_line("Toggle letters, Enter to check: ")
                    .await?
                else {
                    return Ok(Flow::Quit);
                };
                let line = line.trim();
                if line.is_empty() {
                    match quiz.check_answer(session).await {
                        Ok(CheckOutcome::Rejected) => {
                            println!("Select at least one option first.");
                        }
                        Ok(CheckOutcome::Graded(_)) => {}
                        // The answer is already graded; only the history write failed.
                        Err(SessionError::Ledger(err)) => {
                            tracing::error!(%err, "correct answer not saved");
                            println!("Progress not saved: {err}");
                        }
                        Err(err) => return Err(err.into()),
                    }
                    continue;
                }
                for label in line.chars().filter(char::is_ascii_alphabetic) {
                    let accepted =
                        index_for_label(label).is_some_and(|index| session.toggle_option(index));
                    if !accepted {
                        println!("No option {label}.");
                    }
                }
            }
            SessionPhase::Checked => {
                print_feedback(&view);
                if input.read_line("Press Enter to continue ").await?.is_none() {
                    return Ok(Flow::Quit);
                }
                session.advance();
            }
            SessionPhase::Finished => {
                println!();
                println!("=== Session complete ===");
                if let Some(percentage) = view.percentage {
                    println!("{percentage}%");
                }
                println!("Your score: {} / {}", view.score, view.total);
                let more = input.read_line("Press Enter to return to the menu ").await?;
                session.return_to_menu();
                return Ok(if more.is_some() { Flow::Continue } else { Flow::Quit });
            }
            SessionPhase::Idle => return Ok(Flow::Continue),
        }
    }
}

fn print_question(view: &SessionView) {
    let Some(question) = &view.question else {
        return;
    };
    println!();
    println!(
        "[{}/{}] {} · {}",
        view.position, view.total, question.module, question.category
    );
    println!("{}", question.prompt);
    if question.kind == QuestionKind::Multi {
        println!("(select all that apply)");
    }
    for option in &view.options {
        let mark = match (question.kind, option.selected) {
            (QuestionKind::Multi, true) => "[x]",
            (QuestionKind::Multi, false) => "[ ]",
            (QuestionKind::Single, true) => "(*)",
            (QuestionKind::Single, false) => "( )",
        };
        println!("  {mark} {}. {}", option.label, option.text);
    }
}

fn print_feedback(view: &SessionView) {
    println!();
    match view.correct {
        Some(true) => println!("Correct!"),
        _ => println!("Not quite."),
    }
    for option in &view.options {
        let mark = match (option.correct, option.selected) {
            (Some(true), _) => "✓",
            (_, true) => "✗",
            _ => " ",
        };
        println!("  {mark} {}. {}", option.label, option.text);
    }
    let explanation = view
        .question
        .as_ref()
        .and_then(|q| q.explanation.as_deref())
        .filter(|text| !text.trim().is_empty());
    if let Some(explanation) = explanation {
        println!();
        println!("Explanation: {explanation}");
    }
}

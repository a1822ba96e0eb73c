use std::sync::Arc;

use quiz_core::model::PresentedOption;
use quiz_core::{Randomizer, RawModule};
use serde_json::json;
use services::{
    AppConfig, AppServices, CheckOutcome, QuizLoopService, QuizSession, SessionPhase,
    StartOutcome, StaticBankSource,
};
use storage::repository::Storage;

fn module() -> RawModule {
    RawModule::new(
        "smoke",
        json!([
            {
                "category": "Basics",
                "type": "single",
                "question": "Pick Y",
                "options": [
                    { "text": "X", "correct": false },
                    { "text": "Y", "correct": true }
                ],
                "explanation": "Y is right."
            },
            {
                "category": "Basics",
                "type": "multi",
                "question": "Pick A and B",
                "options": [
                    { "text": "A", "correct": true },
                    { "text": "B", "correct": true },
                    { "text": "C", "correct": false }
                ],
                "explanation": "A and B."
            },
            {
                "category": "Basics",
                "type": "single",
                "question": "Pick Z",
                "options": [
                    { "text": "Z", "correct": true },
                    { "text": "W", "correct": false }
                ],
                "explanation": "Z."
            }
        ]),
    )
}

async fn services(storage: &Storage, seed: u64) -> AppServices {
    let config = AppConfig {
        seed: Some(seed),
        ..AppConfig::default()
    };
    AppServices::from_parts(storage, Arc::new(StaticBankSource::new(vec![module()])), &config).await
}

fn select_all_correct(session: &mut QuizSession) {
    let picks: Vec<usize> = session
        .presented_options()
        .iter()
        .enumerate()
        .filter(|(_, o)| o.is_correct())
        .map(|(i, _)| i)
        .collect();
    for i in picks {
        session.toggle_option(i);
    }
}

fn select_first_wrong(session: &mut QuizSession) {
    let idx = session
        .presented_options()
        .iter()
        .position(|o: &PresentedOption| !o.is_correct())
        .expect("every smoke question has a wrong option");
    session.toggle_option(idx);
}

async fn answer_all(
    svc: &QuizLoopService,
    session: &mut QuizSession,
    correct: impl Fn(&str) -> bool,
) {
    while session.phase() == SessionPhase::InProgress {
        let prompt = session.current_question().unwrap().prompt().to_string();
        if correct(&prompt) {
            select_all_correct(session);
        } else {
            select_first_wrong(session);
        }
        let outcome = svc.check_answer(session).await.unwrap();
        assert!(matches!(outcome, CheckOutcome::Graded(_)));
        session.advance();
    }
}

#[tokio::test]
async fn sessions_converge_until_everything_is_completed() {
    let storage = Storage::in_memory();
    let app = services(&storage, 17).await;
    let svc = app.quiz_loop();

    // first pass: only "Pick Y" answered correctly
    let mut session = svc.new_session();
    assert_eq!(
        svc.start_session(&mut session, false).await.unwrap(),
        StartOutcome::Started { total: 3 }
    );
    answer_all(&svc, &mut session, |p| p == "Pick Y").await;
    let outcome = session.outcome().unwrap();
    assert_eq!((outcome.score(), outcome.total(), outcome.percentage()), (1, 3, 33));
    assert!(session.return_to_menu());

    // second pass never shows the recorded question again
    assert_eq!(
        svc.start_session(&mut session, false).await.unwrap(),
        StartOutcome::Started { total: 2 }
    );
    assert!(session.questions().iter().all(|q| q.prompt() != "Pick Y"));
    answer_all(&svc, &mut session, |_| true).await;
    assert_eq!(session.outcome().unwrap().percentage(), 100);
    session.return_to_menu();

    // nothing left
    assert_eq!(
        svc.start_session(&mut session, false).await.unwrap(),
        StartOutcome::AllCompleted
    );
    assert_eq!(svc.completed_count().await, 3);
}

#[tokio::test]
async fn multi_select_needs_exact_match() {
    let storage = Storage::in_memory();
    let app = services(&storage, 3).await;
    let svc = app.quiz_loop();
    let mut session = svc.new_session();
    svc.start_session(&mut session, false).await.unwrap();

    while session.current_question().unwrap().prompt() != "Pick A and B" {
        select_all_correct(&mut session);
        svc.check_answer(&mut session).await.unwrap();
        session.advance();
    }

    // A, B and C selected: too many
    for i in 0..session.presented_options().len() {
        session.toggle_option(i);
    }
    let outcome = svc.check_answer(&mut session).await.unwrap();
    assert!(!outcome.is_correct());

    let multi_id = session.current_question().unwrap().id().clone();
    assert!(!app.ledger().load().await.contains(&multi_id));
}

#[tokio::test]
async fn history_survives_service_restart() {
    let storage = Storage::sqlite("sqlite:file:memdb_services_restart?mode=memory&cache=shared")
        .await
        .expect("sqlite storage");

    {
        let app = services(&storage, 1).await;
        let svc = app.quiz_loop();
        let mut session = svc.new_session();
        svc.start_session(&mut session, false).await.unwrap();
        answer_all(&svc, &mut session, |_| true).await;
    }

    let app = services(&storage, 2).await;
    let svc = app.quiz_loop();
    let mut session = svc.new_session();
    assert_eq!(
        svc.start_session(&mut session, false).await.unwrap(),
        StartOutcome::AllCompleted
    );
    assert_eq!(
        svc.start_session(&mut session, true).await.unwrap(),
        StartOutcome::Started { total: 3 }
    );
}

#[tokio::test]
async fn seeded_sessions_are_reproducible() {
    let bank_order = |seed| async move {
        let storage = Storage::in_memory();
        let app = services(&storage, seed).await;
        let svc = app.quiz_loop();
        let mut session = svc.new_session();
        svc.start_session(&mut session, false).await.unwrap();
        session
            .questions()
            .iter()
            .map(|q| q.id().to_string())
            .collect::<Vec<_>>()
    };

    assert_eq!(bank_order(42).await, bank_order(42).await);
}

#[tokio::test]
async fn randomizer_is_injectable_directly() {
    let storage = Storage::in_memory();
    let app = services(&storage, 0).await;
    let svc = QuizLoopService::new(app.bank(), app.ledger().clone())
        .with_randomizer(Randomizer::seeded(99));
    let mut session = svc.new_session();
    assert!(matches!(
        svc.start_session(&mut session, false).await.unwrap(),
        StartOutcome::Started { .. }
    ));
}

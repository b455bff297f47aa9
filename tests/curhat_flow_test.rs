// End-to-end tests for curhat mode
//
// This test suite verifies that:
// 1. Early turns use the escalating template tiers when no generator runs
// 2. A configured generator supplies replies, with template fallback on error
// 3. Crisis input pre-empts everything and still counts as a turn
// 4. The report offer fires once after enough turns with a shared incident
// 5. Accepting the offer is the only path from curhat into the guided flow

use std::sync::Arc;

use chrono::NaiveDate;
use sigap::config::Config;
use sigap::curhat::{FixedPicker, TransitionChoice, LISTENING};
use sigap::engine::{BotEvent, Engine, Session};
use sigap::gateway::HttpGateway;
use sigap::providers::{DisabledResponder, GroqProvider, ReplyGenerator};

fn test_engine(generator: Arc<dyn ReplyGenerator>, outbox_dir: &std::path::Path) -> Engine {
    let mut config = Config::default();
    config.outbox_dir = outbox_dir.to_path_buf();

    let gateway = HttpGateway::new(&config.backend).unwrap();
    Engine::new(&config, generator, Arc::new(gateway), Box::new(FixedPicker(0)))
        .unwrap()
        .with_today(NaiveDate::from_ymd_opt(2025, 11, 14).unwrap())
}

fn texts(events: &[BotEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            BotEvent::Say(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}

/// With no generator, the first turn answers from the listening tier.
#[tokio::test]
async fn test_first_turn_uses_listening_template() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = test_engine(Arc::new(DisabledResponder), tmp.path());
    let (mut session, opening) = engine.start_curhat();
    assert!(texts(&opening)
        .iter()
        .any(|t| t.contains("ruang aman")));

    let events = engine.handle_turn(&mut session, "aku lagi banyak pikiran").await;
    assert_eq!(texts(&events), vec![LISTENING[0].to_string()]);
}

/// A reachable generator supplies the reply once the session is warm.
#[tokio::test]
async fn test_generated_reply_is_used() {
    let tmp = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"choices":[{"message":{"role":"assistant","content":"Terdengar berat sekali. Aku di sini."}}]}"#,
        )
        .expect_at_least(1)
        .create_async()
        .await;

    let mut config = Config::default();
    config.groq.base_url = server.url();
    config.groq.retry_attempts = 1;
    let generator = GroqProvider::new(&config.groq, "test-key".to_string()).unwrap();

    let engine = test_engine(Arc::new(generator), tmp.path());
    let (mut session, _) = engine.start_curhat();

    engine.handle_turn(&mut session, "aku mau cerita").await;
    let events = engine.handle_turn(&mut session, "hari ini berat banget").await;
    assert_eq!(
        texts(&events),
        vec!["Terdengar berat sekali. Aku di sini.".to_string()]
    );
}

/// Generator failure degrades to a template reply instead of an error.
#[tokio::test]
async fn test_generator_failure_falls_back_to_template() {
    let tmp = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(503)
        .with_body("unavailable")
        .create_async()
        .await;

    let mut config = Config::default();
    config.groq.base_url = server.url();
    config.groq.retry_attempts = 1;
    let generator = GroqProvider::new(&config.groq, "test-key".to_string()).unwrap();

    let engine = test_engine(Arc::new(generator), tmp.path());
    let (mut session, _) = engine.start_curhat();

    engine.handle_turn(&mut session, "aku mau cerita").await;
    let events = engine.handle_turn(&mut session, "aku sedih").await;
    assert_eq!(texts(&events).len(), 1);
    assert!(!texts(&events)[0].is_empty());
}

/// Crisis language in curhat mode yields the safety options, not a
/// supportive template.
#[tokio::test]
async fn test_crisis_preempts_curhat_reply() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = test_engine(Arc::new(DisabledResponder), tmp.path());
    let (mut session, _) = engine.start_curhat();

    let events = engine.handle_turn(&mut session, "aku pengen ngilang").await;
    assert!(events
        .iter()
        .any(|e| matches!(e, BotEvent::SafetyOptions)));

    // the crisis turn still advanced the conversation counter
    match &session {
        Session::Curhat(curhat) => assert_eq!(curhat.turn_count, 1),
        _ => panic!("session changed mode"),
    }
}

/// After five turns with an incident shared, the report offer appears
/// exactly once.
#[tokio::test]
async fn test_report_offer_fires_once() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = test_engine(Arc::new(DisabledResponder), tmp.path());
    let (mut session, _) = engine.start_curhat();

    let turns = [
        "aku mau cerita sesuatu",
        "ada kejadian di kampus kemarin",
        "aku jadi korban perundungan",
        "rasanya campur aduk",
    ];
    for turn in turns {
        let events = engine.handle_turn(&mut session, turn).await;
        assert!(!events
            .iter()
            .any(|e| matches!(e, BotEvent::TransitionOffer)));
    }

    let events = engine.handle_turn(&mut session, "masih kepikiran terus").await;
    assert!(events
        .iter()
        .any(|e| matches!(e, BotEvent::TransitionOffer)));

    let events = engine.handle_turn(&mut session, "iya begitulah").await;
    assert!(!events
        .iter()
        .any(|e| matches!(e, BotEvent::TransitionOffer)));
}

/// Accepting the offer replaces the curhat session with a fresh guided
/// one starting at the first question.
#[tokio::test]
async fn test_accept_offer_bridges_to_guided() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = test_engine(Arc::new(DisabledResponder), tmp.path());
    let (mut session, _) = engine.start_curhat();

    let events = engine.transition_choice(&mut session, TransitionChoice::Accept);
    assert!(matches!(session, Session::Guided(_)));
    assert!(texts(&events)
        .iter()
        .any(|t| t.contains("Siapa nama lengkap kamu?")));
}

/// Declining or postponing stays in curhat mode.
#[tokio::test]
async fn test_decline_and_postpone_stay_in_curhat() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = test_engine(Arc::new(DisabledResponder), tmp.path());

    let (mut session, _) = engine.start_curhat();
    let events = engine.transition_choice(&mut session, TransitionChoice::Decline);
    assert!(matches!(session, Session::Curhat(_)));
    assert!(texts(&events).iter().any(|t| t.contains("Tidak masalah")));

    let (mut session, _) = engine.start_curhat();
    let events = engine.transition_choice(&mut session, TransitionChoice::Postpone);
    assert!(matches!(session, Session::Curhat(_)));
    assert!(texts(&events).iter().any(|t| t.contains("kapan saja")));
}

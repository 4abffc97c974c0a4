//! End-to-end chat flow tests through the HTTP router.
//!
//! A mock assistant client, an in-memory transcript store, and a recording
//! sleeper stand in for the external collaborators, so every flow runs
//! deterministically and without network access.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use secrecy::Secret;
use tower::ServiceExt;

use gravity_backend::adapters::assistant::{assistant_text, MockAssistantClient, MockFailure};
use gravity_backend::adapters::http::chat::{chat_router, ChatAppState};
use gravity_backend::adapters::memory::{InMemoryTranscriptStore, RecordingSleeper};
use gravity_backend::application::handlers::chat::ChatOrchestrator;
use gravity_backend::config::AssistantConfig;
use gravity_backend::domain::chat::{replies, RunStatus, SessionPolicy, Turn};

struct TestApp {
    router: Router,
    client: MockAssistantClient,
    store: InMemoryTranscriptStore,
    sleeper: RecordingSleeper,
}

fn test_config(policy: SessionPolicy) -> AssistantConfig {
    AssistantConfig {
        api_key: Some(Secret::new("sk-test".to_string())),
        assistant_id: Some("asst_test".to_string()),
        session_policy: policy,
        poll_max_attempts: 4,
        ..Default::default()
    }
}

fn test_app(config: AssistantConfig, client: MockAssistantClient) -> TestApp {
    let store = InMemoryTranscriptStore::new();
    let sleeper = RecordingSleeper::new();
    let orchestrator = ChatOrchestrator::new(
        config,
        "You are a helpful assistant.".to_string(),
        Arc::new(client.clone()),
        Arc::new(store.clone()),
        Arc::new(sleeper.clone()),
    );
    TestApp {
        router: chat_router().with_state(ChatAppState::new(Arc::new(orchestrator))),
        client,
        store,
        sleeper,
    }
}

async fn post_chat(router: Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn stateless_turn_round_trips_history_into_transcript() {
    let app = test_app(
        test_config(SessionPolicy::StatelessReplay),
        MockAssistantClient::new().with_completion("Here is an answer."),
    );

    let (status, json) = post_chat(
        app.router,
        serde_json::json!({
            "message": "What next?",
            "history": [["Hi", "Hello!"]],
            "sessionId": "client-7"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reply"], "Here is an answer.");
    assert!(json.get("sessionId").is_none());

    let records = app.store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].session_id, "client-7");
    assert_eq!(
        records[0].turns,
        vec![
            Turn::new("Hi", "Hello!"),
            Turn::new("What next?", "Here is an answer."),
        ]
    );
}

#[tokio::test]
async fn reusable_thread_session_survives_two_turns() {
    let app = test_app(
        test_config(SessionPolicy::ReusableThread),
        MockAssistantClient::new()
            .with_thread_id("thread_123")
            .with_run_statuses([RunStatus::Completed, RunStatus::Completed])
            .with_thread_messages(vec![assistant_text("First reply")]),
    );

    let (_, first) = post_chat(
        app.router.clone(),
        serde_json::json!({"message": "first"}),
    )
    .await;
    assert_eq!(first["sessionId"], "thread_123");

    // Second turn resends the minted session id; no new thread is created.
    let (_, second) = post_chat(
        app.router,
        serde_json::json!({"message": "second", "sessionId": "thread_123"}),
    )
    .await;
    assert_eq!(second["sessionId"], "thread_123");
    assert_eq!(app.client.calls().create_thread, 1);
    assert_eq!(app.client.calls().create_run, 2);

    let records = app.store.records();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.session_id == "thread_123"));
}

#[tokio::test]
async fn ephemeral_thread_mints_per_turn_and_hides_session() {
    let app = test_app(
        test_config(SessionPolicy::EphemeralThread),
        MockAssistantClient::new()
            .with_run_statuses([RunStatus::Completed, RunStatus::Completed])
            .with_thread_messages(vec![assistant_text("reply")]),
    );

    let (_, first) = post_chat(app.router.clone(), serde_json::json!({"message": "a"})).await;
    let (_, second) = post_chat(app.router, serde_json::json!({"message": "b"})).await;

    assert!(first.get("sessionId").is_none());
    assert!(second.get("sessionId").is_none());
    assert_eq!(app.client.calls().create_thread, 2);
}

#[tokio::test]
async fn slow_run_exhausts_poll_budget() {
    let app = test_app(
        test_config(SessionPolicy::ReusableThread),
        MockAssistantClient::new(),
    );

    let (status, json) = post_chat(app.router, serde_json::json!({"message": "hi"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reply"], replies::RUN_TIMED_OUT);
    assert_eq!(app.client.calls().retrieve_run, 4);
    assert_eq!(app.sleeper.count(), 3);
    assert!(app
        .sleeper
        .sleeps()
        .iter()
        .all(|d| *d == Duration::from_millis(500)));
}

#[tokio::test]
async fn failed_run_reports_incomplete_without_message_fetch() {
    let app = test_app(
        test_config(SessionPolicy::ReusableThread),
        MockAssistantClient::new().with_run_statuses([RunStatus::InProgress, RunStatus::Failed]),
    );

    let (_, json) = post_chat(app.router, serde_json::json!({"message": "hi"})).await;

    assert_eq!(json["reply"], replies::RUN_INCOMPLETE);
    assert_eq!(app.client.calls().list_messages, 0);
    // The fallback reply still lands in the transcript.
    assert_eq!(
        app.store.records()[0].turns,
        vec![Turn::new("hi", replies::RUN_INCOMPLETE)]
    );
}

#[tokio::test]
async fn network_failure_keeps_the_contract() {
    let app = test_app(
        test_config(SessionPolicy::ReusableThread),
        MockAssistantClient::new()
            .with_post_message_failure(MockFailure::Network("reset".to_string())),
    );

    let (status, json) = post_chat(app.router, serde_json::json!({"message": "hi"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reply"], replies::ASSISTANT_UNAVAILABLE);
}

#[tokio::test]
async fn missing_message_answers_without_touching_collaborators() {
    let app = test_app(
        test_config(SessionPolicy::ReusableThread),
        MockAssistantClient::new(),
    );

    let (status, json) = post_chat(app.router, serde_json::json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reply"], replies::NO_MESSAGE);
    assert_eq!(app.client.calls().total(), 0);
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn unconfigured_assistant_answers_fixed_reply() {
    let mut config = test_config(SessionPolicy::EphemeralThread);
    config.assistant_id = None;
    let app = test_app(config, MockAssistantClient::new());

    let (_, json) = post_chat(app.router, serde_json::json!({"message": "hi"})).await;

    assert_eq!(json["reply"], replies::NOT_CONFIGURED);
    assert_eq!(app.client.calls().total(), 0);
}

#[tokio::test]
async fn completed_run_with_no_assistant_text_yields_placeholder() {
    let app = test_app(
        test_config(SessionPolicy::ReusableThread),
        MockAssistantClient::new()
            .with_run_statuses([RunStatus::Completed])
            .with_thread_messages(vec![]),
    );

    let (_, json) = post_chat(app.router, serde_json::json!({"message": "hi"})).await;
    assert_eq!(json["reply"], replies::EMPTY_REPLY);
}

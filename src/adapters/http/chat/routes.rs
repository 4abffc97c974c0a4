//! Axum routes for the chat endpoint.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{health, post_chat, ChatAppState};

/// Creates routes for chat endpoints.
///
/// - POST /chat - resolve one chat turn
pub fn chat_routes() -> Router<ChatAppState> {
    Router::new().route("/chat", post(post_chat))
}

/// Combined router: chat routes under /api plus the liveness probe.
pub fn chat_router() -> Router<ChatAppState> {
    Router::new()
        .nest("/api", chat_routes())
        .route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::assistant::MockAssistantClient;
    use crate::adapters::memory::{InMemoryTranscriptStore, RecordingSleeper};
    use crate::application::handlers::chat::ChatOrchestrator;
    use crate::config::AssistantConfig;
    use crate::domain::chat::{replies, SessionPolicy};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use secrecy::Secret;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(client: MockAssistantClient, policy: SessionPolicy) -> Router {
        let config = AssistantConfig {
            api_key: Some(Secret::new("sk-test".to_string())),
            assistant_id: Some("asst_test".to_string()),
            session_policy: policy,
            ..Default::default()
        };
        let orchestrator = ChatOrchestrator::new(
            config,
            "sys".to_string(),
            Arc::new(client),
            Arc::new(InMemoryTranscriptStore::new()),
            Arc::new(RecordingSleeper::new()),
        );
        chat_router().with_state(ChatAppState::new(Arc::new(orchestrator)))
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn chat_returns_reply_with_200() {
        let app = app(
            MockAssistantClient::new().with_completion("hello there"),
            SessionPolicy::StatelessReplay,
        );

        let response = app
            .oneshot(post_json(r#"{"message": "hi"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["reply"], "hello there");
        assert!(json.get("sessionId").is_none());
    }

    #[tokio::test]
    async fn empty_body_still_answers_200_with_fallback() {
        let app = app(MockAssistantClient::new(), SessionPolicy::StatelessReplay);

        let response = app.oneshot(post_json("{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["reply"], replies::NO_MESSAGE);
    }

    #[tokio::test]
    async fn upstream_failure_still_answers_200() {
        use crate::adapters::assistant::MockFailure;
        let app = app(
            MockAssistantClient::new().with_completion_failure(MockFailure::Network(
                "down".to_string(),
            )),
            SessionPolicy::StatelessReplay,
        );

        let response = app
            .oneshot(post_json(r#"{"message": "hi"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["reply"], replies::COMPLETION_UNAVAILABLE);
    }

    #[tokio::test]
    async fn reusable_thread_policy_exposes_session_id() {
        use crate::adapters::assistant::assistant_text;
        use crate::domain::chat::RunStatus;

        let app = app(
            MockAssistantClient::new()
                .with_thread_id("thread_abc")
                .with_run_statuses([RunStatus::Completed])
                .with_thread_messages(vec![assistant_text("reply")]),
            SessionPolicy::ReusableThread,
        );

        let response = app
            .oneshot(post_json(r#"{"message": "hi"}"#))
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["reply"], "reply");
        assert_eq!(json["sessionId"], "thread_abc");
    }

    #[tokio::test]
    async fn unparseable_json_is_rejected_before_the_handler() {
        let app = app(MockAssistantClient::new(), SessionPolicy::StatelessReplay);

        let response = app.oneshot(post_json("{not json")).await.unwrap();
        assert_ne!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let app = app(MockAssistantClient::new(), SessionPolicy::StatelessReplay);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
    }
}

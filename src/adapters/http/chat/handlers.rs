//! HTTP handlers for the chat endpoint.
//!
//! These handlers connect Axum routes to application layer operations.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::chat::{ChatOrchestrator, ChatTurnRequest};

use super::dto::{ChatReplyBody, ChatTurnBody};

/// Shared application state for chat handlers.
#[derive(Clone)]
pub struct ChatAppState {
    pub orchestrator: Arc<ChatOrchestrator>,
}

impl ChatAppState {
    /// Creates a new ChatAppState.
    pub fn new(orchestrator: Arc<ChatOrchestrator>) -> Self {
        Self { orchestrator }
    }
}

/// POST /api/chat - resolve one chat turn.
///
/// Always answers 200 with a reply-shaped body. Upstream failures surface as
/// fixed fallback reply strings, never as HTTP error statuses; the only
/// non-200 outcomes are body-level ones (unparseable JSON) produced by the
/// extractor before this handler runs.
pub async fn post_chat(
    State(state): State<ChatAppState>,
    Json(body): Json<ChatTurnBody>,
) -> impl IntoResponse {
    let request = ChatTurnRequest {
        message: body.message,
        history: body.history,
        session_id: body.session_id,
    };

    let outcome = state.orchestrator.handle(request).await;

    (
        StatusCode::OK,
        Json(ChatReplyBody {
            reply: outcome.reply,
            session_id: outcome.session_id,
        }),
    )
}

/// GET /health - liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

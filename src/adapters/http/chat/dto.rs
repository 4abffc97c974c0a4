//! HTTP DTOs for the chat endpoint.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::chat::Turn;

/// Inbound body for a chat turn.
///
/// Every field is optional on the wire; a missing `message` is treated as
/// empty and short-circuited downstream rather than rejected with a 4xx.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurnBody {
    /// The new user message.
    #[serde(default)]
    pub message: String,
    /// Prior turns, resent by the client each call.
    ///
    /// Malformed entries (arrays not of exactly two strings) fail
    /// deserialization of the whole body.
    #[serde(default)]
    pub history: Vec<Turn>,
    /// Opaque session identifier from an earlier response.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Outbound body for a chat turn. Always this shape, success or fallback.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReplyBody {
    /// The reply text.
    pub reply: String,
    /// Session identifier for the client to resend, when the active policy
    /// exposes one. Absent otherwise, never null.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

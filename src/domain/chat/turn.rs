//! Conversational turns and transcript records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One (user message, assistant reply) pair. Immutable once recorded.
///
/// Wire form is a 2-element JSON array `[user, reply]`. Anything other than
/// exactly two elements is a caller error and fails deserialization; one side
/// of a pair is never silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "(String, String)")]
pub struct Turn {
    /// What the user said.
    pub user: String,
    /// What the assistant replied.
    pub reply: String,
}

impl Turn {
    /// Creates a new turn.
    pub fn new(user: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            reply: reply.into(),
        }
    }
}

/// A history entry that is not a 2-element pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("history turns must be [user, reply] pairs, got {0} elements")]
pub struct MalformedTurn(pub usize);

impl TryFrom<Vec<String>> for Turn {
    type Error = MalformedTurn;

    fn try_from(entry: Vec<String>) -> Result<Self, Self::Error> {
        let len = entry.len();
        let mut elements = entry.into_iter();
        match (elements.next(), elements.next(), elements.next()) {
            (Some(user), Some(reply), None) => Ok(Self { user, reply }),
            _ => Err(MalformedTurn(len)),
        }
    }
}

impl From<Turn> for (String, String) {
    fn from(turn: Turn) -> Self {
        (turn.user, turn.reply)
    }
}

/// One persisted snapshot of a session's history at the time of a request.
///
/// Append-only: every inbound request produces a fresh record (prior history
/// plus the new turn), never a read-modify-write of an earlier record. A
/// session's full transcript is the union of its records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    /// Session identifier correlating records to one conversation context.
    pub session_id: String,
    /// When this snapshot was taken.
    pub recorded_at: DateTime<Utc>,
    /// Prior history plus the new turn, in order.
    pub turns: Vec<Turn>,
}

impl TranscriptRecord {
    /// Session identifier used when the caller supplied none and no remote
    /// thread exists to borrow one from.
    pub const ANONYMOUS_SESSION: &'static str = "anonymous";

    /// Creates a record timestamped now.
    pub fn new(session_id: impl Into<String>, turns: Vec<Turn>) -> Self {
        Self {
            session_id: session_id.into(),
            recorded_at: Utc::now(),
            turns,
        }
    }

    /// Creates a record with an explicit timestamp.
    pub fn recorded_at(
        session_id: impl Into<String>,
        recorded_at: DateTime<Utc>,
        turns: Vec<Turn>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            recorded_at,
            turns,
        }
    }
}

//! PostgreSQL implementation of TranscriptStore.
//!
//! Every append inserts a fresh row; a session's transcript is the union of
//! its rows ordered by `recorded_at`. No read-modify-write, so concurrent
//! requests never contend.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::chat::TranscriptRecord;
use crate::ports::{TranscriptStore, TranscriptStoreError};

/// PostgreSQL implementation of TranscriptStore.
#[derive(Clone)]
pub struct PostgresTranscriptStore {
    pool: PgPool,
}

impl PostgresTranscriptStore {
    /// Creates a new PostgresTranscriptStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TranscriptStore for PostgresTranscriptStore {
    async fn append(&self, record: &TranscriptRecord) -> Result<(), TranscriptStoreError> {
        let turns = serde_json::to_value(&record.turns).map_err(|e| {
            TranscriptStoreError::Serialization(format!("Failed to serialize turns: {}", e))
        })?;

        sqlx::query(
            r#"
            INSERT INTO transcripts (id, session_id, recorded_at, turns)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&record.session_id)
        .bind(record.recorded_at)
        .bind(turns)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            TranscriptStoreError::Database(format!("Failed to insert transcript: {}", e))
        })?;

        Ok(())
    }
}

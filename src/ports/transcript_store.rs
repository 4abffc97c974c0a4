//! Transcript Store Port - best-effort persistence of conversation snapshots.

use async_trait::async_trait;

use crate::domain::chat::TranscriptRecord;

/// Port for the transcript document store.
///
/// Append-only from the orchestrator's perspective: one record per inbound
/// request, no read-modify-write. Callers treat failures as non-fatal.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Appends one transcript record.
    async fn append(&self, record: &TranscriptRecord) -> Result<(), TranscriptStoreError>;
}

/// Transcript store errors.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptStoreError {
    /// Constraint violation or connectivity loss.
    #[error("database error: {0}")]
    Database(String),

    /// The record could not be serialized for storage.
    #[error("serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_displays() {
        let err = TranscriptStoreError::Database("connection refused".to_string());
        assert_eq!(err.to_string(), "database error: connection refused");
    }
}

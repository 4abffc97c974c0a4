//! In-memory implementation of TranscriptStore, for tests and local runs.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::chat::TranscriptRecord;
use crate::ports::{TranscriptStore, TranscriptStoreError};

/// In-memory transcript store.
///
/// Clones share the same record list, so a test can keep a handle for
/// verification while the orchestrator owns another. Failure injection
/// covers the fire-and-forget persistence path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTranscriptStore {
    records: Arc<Mutex<Vec<TranscriptRecord>>>,
    fail_next: Arc<Mutex<Option<String>>>,
}

impl InMemoryTranscriptStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent append fail with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        let store = Self::new();
        *store.fail_next.lock().unwrap() = Some(message.into());
        store
    }

    /// Returns a snapshot of the appended records, in order.
    pub fn records(&self) -> Vec<TranscriptRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Number of appended records.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Whether no record has been appended.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TranscriptStore for InMemoryTranscriptStore {
    async fn append(&self, record: &TranscriptRecord) -> Result<(), TranscriptStoreError> {
        if let Some(message) = self.fail_next.lock().unwrap().clone() {
            return Err(TranscriptStoreError::Database(message));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

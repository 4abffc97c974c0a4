//! PostgreSQL adapters.

mod transcript_store;

pub use transcript_store::PostgresTranscriptStore;

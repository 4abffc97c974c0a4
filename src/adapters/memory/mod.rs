//! In-memory adapters for tests and local development.

mod sleeper;
mod transcript_store;

pub use sleeper::RecordingSleeper;
pub use transcript_store::InMemoryTranscriptStore;

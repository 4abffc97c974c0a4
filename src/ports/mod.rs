//! Ports - interfaces to external collaborators.
//!
//! Adapters implement these traits; the application layer depends only on
//! the traits, never on concrete services.

mod assistant_client;
mod clock;
mod transcript_store;

pub use assistant_client::{
    AssistantClient, AssistantError, ChatMessage, CompletionRequest, MessageContent, MessageOrder,
    MessageRole, RunId, TextContent, ThreadId, ThreadMessage,
};
pub use clock::{Sleeper, TokioSleeper};
pub use transcript_store::{TranscriptStore, TranscriptStoreError};

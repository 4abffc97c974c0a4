//! Chat domain - conversational turns, prompt assembly, run lifecycle,
//! session policy, and reply extraction.

mod policy;
mod prompt;
mod reply;
pub mod replies;
mod run;
mod turn;

pub use policy::SessionPolicy;
pub use prompt::{build_messages, compose_system_prompt, load_reference_document};
pub use reply::extract_reply;
pub use run::RunStatus;
pub use turn::{MalformedTurn, TranscriptRecord, Turn};

//! Chat turn handling.

mod handle_turn;

pub use handle_turn::{ChatOrchestrator, ChatTurnOutcome, ChatTurnRequest};

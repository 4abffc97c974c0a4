//! Fixed user-facing reply strings.
//!
//! The chat contract is "always get a reply-shaped response": every failure
//! mode resolves to one of these strings while full detail is logged
//! server-side. Tests assert the exact wording, so changes here are breaking.

/// Returned when the inbound request carries no message text.
pub const NO_MESSAGE: &str = "No message provided.";

/// Returned when a thread-backed policy is selected but no assistant
/// identifier is configured.
pub const NOT_CONFIGURED: &str = "Assistant not configured.";

/// Returned when the stateless completion call fails for any reason.
pub const COMPLETION_UNAVAILABLE: &str = "Sorry, there was an error contacting the AI service.";

/// Returned when any thread/run operation fails for any reason.
pub const ASSISTANT_UNAVAILABLE: &str = "Sorry, there was an error contacting the assistant.";

/// Returned when the run reaches failed, cancelled, or expired.
pub const RUN_INCOMPLETE: &str = "Sorry, the assistant run did not complete.";

/// Returned when the run never reaches a terminal state within the poll budget.
pub const RUN_TIMED_OUT: &str = "Sorry, the assistant took too long to respond.";

/// Returned when a completed run yields no assistant text part.
pub const EMPTY_REPLY: &str = "No reply.";

//! Session lifecycle policy.

use serde::Deserialize;

/// How a caller's conversational context is carried between requests.
///
/// Three lifecycles coexist and are selected by configuration, never merged:
/// full history replayed by the caller, a reusable remote thread keyed by the
/// session identifier, or a throwaway remote thread per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionPolicy {
    /// No server-side session; the caller resends full history every request
    /// and the model context is rebuilt from it.
    #[default]
    StatelessReplay,
    /// The caller supplies a session identifier naming a remote thread; when
    /// absent one is minted and returned for reuse on subsequent calls.
    ReusableThread,
    /// A new remote thread is minted on every call and never returned; it
    /// exists only to invoke the assistant once.
    EphemeralThread,
}

impl SessionPolicy {
    /// Whether this policy resolves replies through a remote thread and run.
    pub fn uses_thread(&self) -> bool {
        matches!(self, Self::ReusableThread | Self::EphemeralThread)
    }

    /// Whether the resulting thread identifier is handed back to the caller.
    pub fn exposes_session_id(&self) -> bool {
        matches!(self, Self::ReusableThread)
    }
}

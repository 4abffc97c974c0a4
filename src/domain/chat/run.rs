//! Run status observations.

use serde::{Deserialize, Serialize};

/// Observed state of a remote assistant run.
///
/// The remote service owns all transitions; the orchestrator only initiates a
/// run and observes its status via polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Accepted but not yet executing.
    Queued,
    /// Currently executing.
    InProgress,
    /// Finished; a reply is available to fetch.
    Completed,
    /// Ended without producing a reply.
    Failed,
    /// Cancelled remotely.
    Cancelled,
    /// Exceeded the remote service's own time budget.
    Expired,
}

impl RunStatus {
    /// Parses a wire status string.
    ///
    /// Statuses this backend has no branch for (e.g. `requires_action`) are
    /// observed as still in progress, so the poll loop keeps waiting until
    /// its attempt cap.
    pub fn from_wire(status: &str) -> Self {
        match status {
            "queued" => Self::Queued,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "cancelled" => Self::Cancelled,
            "expired" => Self::Expired,
            _ => Self::InProgress,
        }
    }

    /// Whether polling should stop at this status.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Failed | Self::Cancelled | Self::Expired
        )
    }

    /// Whether this status means a reply can be fetched.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

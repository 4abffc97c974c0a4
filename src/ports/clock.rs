//! Sleeper Port - injectable suspension for the run-poll loop.
//!
//! The polling loop is the only suspension point in a request's lifetime.
//! Hiding the sleep behind a port lets tests drive the loop deterministically
//! instead of waiting on a live timer.

use async_trait::async_trait;
use std::time::Duration;

/// Port for cooperative suspension between poll attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspends the current task for the given duration.
    async fn sleep(&self, duration: Duration);
}

/// Runtime sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

//! Recording sleeper, for deterministic polling tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::ports::Sleeper;

/// Sleeper that returns immediately and records each requested duration.
///
/// Lets tests assert exactly how many sleeps a poll loop performed and how
/// long each would have been, without waiting on a live timer.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    /// Creates a new recording sleeper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded sleep durations, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }

    /// Number of sleeps performed.
    pub fn count(&self) -> usize {
        self.sleeps.lock().unwrap().len()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

//! Delivery pacing for engine moves
//!
//! The search always runs to completion; a fast answer is simply held back
//! until the configured minimum pause has elapsed.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    min_pause: Duration,
}

impl Pacing {
    pub fn new(min_pause_ms: u64) -> Self {
        Self {
            min_pause: Duration::from_millis(min_pause_ms),
        }
    }

    /// Remaining wait before delivering a move that took `elapsed` to compute
    pub fn delay_after(&self, elapsed: Duration) -> Duration {
        self.min_pause.saturating_sub(elapsed)
    }
}

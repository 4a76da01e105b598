//! Sweep tuning.

use std::time::Duration;

use super::CircuitBreaker;

/// Page size, throttling and thresholds for one sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    /// Records requested per listing page (default: 100, the server maximum)
    pub page_limit: u32,

    /// Pause between listing requests (default: 100ms)
    pub list_delay: Duration,

    /// Pause after every delete attempt, successful or not (default: 200ms)
    pub delete_delay: Duration,

    /// Report progress every this many records, and on the last one (default: 10)
    pub progress_interval: usize,

    /// When to stop and ask the operator whether to continue
    pub breaker: CircuitBreaker,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            page_limit: 100,
            list_delay: Duration::from_millis(100),
            delete_delay: Duration::from_millis(200),
            progress_interval: 10,
            breaker: CircuitBreaker::default(),
        }
    }
}

impl SweepConfig {
    /// Returns true if progress should be reported after the 1-based
    /// `index` of `total` records.
    pub fn progress_due(&self, index: usize, total: usize) -> bool {
        index == total || (self.progress_interval > 0 && index % self.progress_interval == 0)
    }
}

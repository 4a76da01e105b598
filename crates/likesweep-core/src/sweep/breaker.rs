//! Error-rate threshold for bulk deletion.

/// Decides when a deletion run has failed often enough to stop and ask.
///
/// Trips only when both conditions hold: more than `min_errors` failures
/// so far, and a running failure ratio strictly above `max_error_ratio`.
/// The absolute floor keeps a couple of early failures from tripping it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircuitBreaker {
    /// Failures that must be exceeded before the ratio is considered (default: 5)
    pub min_errors: usize,

    /// Failure ratio that must be exceeded (default: 0.10 = 10%)
    pub max_error_ratio: f64,
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self {
            min_errors: 5,
            max_error_ratio: 0.10,
        }
    }
}

impl CircuitBreaker {
    /// Returns true once `errors` out of `attempted` deletes crosses the threshold.
    pub fn trips(&self, errors: usize, attempted: usize) -> bool {
        attempted > 0
            && errors > self.min_errors
            && errors as f64 / attempted as f64 > self.max_error_ratio
    }
}

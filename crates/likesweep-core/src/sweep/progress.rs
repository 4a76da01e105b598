//! Progress snapshots.

use std::fmt;

/// Where a deletion run stands after the record at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based position of the record just attempted.
    pub index: usize,
    /// Number of records in the run.
    pub total: usize,
    /// Successful deletes so far.
    pub deleted: usize,
    /// Failed deletes so far.
    pub errors: usize,
}

impl Progress {
    /// Share of the run attempted, 0 to 100.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.index as f64 * 100.0 / self.total as f64
    }

    /// Share of attempts that failed, 0 to 1.
    pub fn error_ratio(&self) -> f64 {
        if self.index == 0 {
            return 0.0;
        }
        self.errors as f64 / self.index as f64
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} deleted, {} errors ({:.1}%)",
            self.deleted,
            self.errors,
            self.percent()
        )
    }
}

//! Sweep progress notifications.

use crate::Error;
use crate::repo::Record;
use crate::sweep::Progress;

/// Receives notifications while a sweep runs.
///
/// Every method defaults to doing nothing, so an implementation only
/// overrides what it displays.
pub trait Reporter: Send + Sync {
    /// A page was appended; `total` is the number of records collected so far.
    fn page_collected(&self, _total: usize) {}

    /// Listing stopped on an error after collecting `collected` records.
    fn listing_stopped(&self, _collected: usize, _error: &Error) {}

    /// Deletion of `total` records is about to begin.
    fn deletion_started(&self, _total: usize) {}

    /// Deleting the record at 1-based `index` failed.
    fn delete_failed(&self, _index: usize, _record: &Record, _error: &Error) {}

    /// Periodic progress snapshot.
    fn progress(&self, _progress: &Progress) {}

    /// The error rate crossed the breaker threshold.
    fn breaker_tripped(&self, _progress: &Progress) {}
}

/// A reporter that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl Reporter for NoopReporter {}

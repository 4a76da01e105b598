//! Preview statistics for a collected listing.

use chrono::{DateTime, Utc};

use crate::repo::Record;

/// Summary of a listing shown before anything is deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingStats {
    /// Records collected.
    pub total: usize,
    /// Records whose key is a timestamp identifier.
    pub tid_keys: usize,
    /// Earliest `createdAt` among the records.
    pub oldest: Option<DateTime<Utc>>,
    /// Latest `createdAt` among the records.
    pub newest: Option<DateTime<Utc>>,
}

impl ListingStats {
    pub fn from_records(records: &[Record]) -> Self {
        let mut stats = Self {
            total: records.len(),
            ..Self::default()
        };

        for record in records {
            if record.rkey().is_tid() {
                stats.tid_keys += 1;
            }
            if let Some(at) = record.created_at() {
                stats.oldest = Some(stats.oldest.map_or(at, |o| o.min(at)));
                stats.newest = Some(stats.newest.map_or(at, |n| n.max(at)));
            }
        }

        stats
    }
}

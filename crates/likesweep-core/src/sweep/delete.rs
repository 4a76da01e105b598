//! Bulk deletion.

use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::repo::Record;
use crate::traits::{Prompter, Reporter, Session};
use crate::types::Nsid;

use super::{Progress, SweepConfig};

/// Success and failure counts of a deletion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Records deleted.
    pub deleted: usize,
    /// Delete calls that failed.
    pub errors: usize,
    /// Records a delete was attempted for.
    pub attempted: usize,
}

impl Tally {
    /// Records of `total` that were never attempted.
    pub fn untouched(&self, total: usize) -> usize {
        total.saturating_sub(self.attempted)
    }
}

/// How a deletion run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// There was nothing to delete; the operator was not asked.
    Empty,
    /// The operator declined; nothing was deleted.
    Declined,
    /// Every record was attempted.
    Finished(Tally),
    /// The operator stopped the run after the breaker tripped.
    Halted(Tally),
}

impl DeleteOutcome {
    /// The final counts (all zero if nothing ran).
    pub fn tally(&self) -> Tally {
        match self {
            DeleteOutcome::Empty | DeleteOutcome::Declined => Tally::default(),
            DeleteOutcome::Finished(tally) | DeleteOutcome::Halted(tally) => *tally,
        }
    }
}

/// Delete every record in `records` from the session's `collection`.
///
/// Asks the operator once before the first delete. Each record is
/// addressed by the session DID, `collection`, and the key taken from the
/// record's URI. A failed delete is counted and the run moves on; after a
/// failure that trips the breaker the operator decides whether to
/// continue. Only a failing prompt is returned as an error.
#[instrument(skip_all, fields(did = %session.did(), %collection, total = records.len()))]
pub async fn delete_all<S>(
    session: &S,
    collection: &Nsid,
    records: &[Record],
    prompter: &dyn Prompter,
    reporter: &dyn Reporter,
    config: &SweepConfig,
) -> Result<DeleteOutcome>
where
    S: Session + ?Sized,
{
    if records.is_empty() {
        debug!("Nothing to delete");
        return Ok(DeleteOutcome::Empty);
    }

    let total = records.len();
    let question = format!("Are you sure you want to delete {total} likes?");
    if !prompter.confirm(&question).await? {
        info!("Deletion declined");
        return Ok(DeleteOutcome::Declined);
    }

    reporter.deletion_started(total);
    let mut tally = Tally::default();

    for (index, record) in (1..).zip(records) {
        let result = session
            .delete_record(session.did(), collection, record.rkey())
            .await;
        tally.attempted = index;

        let failed = match result {
            Ok(()) => {
                tally.deleted += 1;
                debug!(index, rkey = %record.rkey(), subject = ?record.subject_uri(), "Deleted");
                false
            }
            Err(error) => {
                tally.errors += 1;
                warn!(
                    index,
                    uri = %record.uri,
                    subject = ?record.subject_uri(),
                    %error,
                    "Delete failed"
                );
                reporter.delete_failed(index, record, &error);
                true
            }
        };

        let progress = Progress {
            index,
            total,
            deleted: tally.deleted,
            errors: tally.errors,
        };
        if config.progress_due(index, total) {
            reporter.progress(&progress);
        }

        if failed && config.breaker.trips(tally.errors, index) {
            warn!(errors = tally.errors, index, "Error rate above threshold");
            reporter.breaker_tripped(&progress);
            if !prompter.confirm("Many errors occurred. Continue?").await? {
                info!(?tally, "Deletion halted by operator");
                return Ok(DeleteOutcome::Halted(tally));
            }
        }

        sleep(config.delete_delay).await;
    }

    info!(?tally, "Deletion complete");
    Ok(DeleteOutcome::Finished(tally))
}

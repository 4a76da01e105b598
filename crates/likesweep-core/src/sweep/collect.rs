//! Paginated collection.

use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::Error;
use crate::repo::Record;
use crate::traits::{Reporter, Session};
use crate::types::Nsid;

use super::SweepConfig;

/// Everything a listing pass gathered.
#[derive(Debug, Default)]
pub struct Listing {
    /// Records in the order the server returned them, across all pages.
    pub records: Vec<Record>,

    /// Number of non-empty pages fetched.
    pub pages: usize,

    /// The error that cut the listing short, if any.
    pub stopped: Option<Error>,
}

impl Listing {
    /// Returns true if the listing ran until the server said it was done.
    pub fn is_complete(&self) -> bool {
        self.stopped.is_none()
    }

    /// Returns the number of records collected.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records were collected.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Drain every page of `collection` in the session's own repository.
///
/// Stops on an empty page or when the server omits the cursor. A failed
/// request ends the listing with what was gathered so far; the error is
/// kept in [`Listing::stopped`] rather than returned.
#[instrument(skip_all, fields(did = %session.did(), %collection))]
pub async fn collect_all<S>(
    session: &S,
    collection: &Nsid,
    config: &SweepConfig,
    reporter: &dyn Reporter,
) -> Listing
where
    S: Session + ?Sized,
{
    let mut listing = Listing::default();
    let mut cursor: Option<String> = None;

    loop {
        let page = match session
            .list_records(
                session.did(),
                collection,
                Some(config.page_limit),
                cursor.as_deref(),
            )
            .await
        {
            Ok(page) => page,
            Err(error) => {
                warn!(%error, collected = listing.len(), "Listing stopped early");
                reporter.listing_stopped(listing.len(), &error);
                listing.stopped = Some(error);
                return listing;
            }
        };

        if page.records.is_empty() {
            debug!("Empty page, listing exhausted");
            break;
        }

        listing.pages += 1;
        listing.records.extend(page.records);
        debug!(page = listing.pages, total = listing.len(), "Collected page");
        reporter.page_collected(listing.len());

        match page.cursor {
            Some(next) if !next.is_empty() => cursor = Some(next),
            _ => break,
        }

        sleep(config.list_delay).await;
    }

    info!(total = listing.len(), pages = listing.pages, "Listing complete");
    listing
}

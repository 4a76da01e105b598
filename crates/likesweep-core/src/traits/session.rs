//! Authenticated session trait.

use async_trait::async_trait;

use crate::Result;
use crate::repo::ListRecordsOutput;
use crate::types::{Did, Nsid, PdsUrl, Rkey};

/// An authenticated session for repository operations.
#[async_trait]
pub trait Session: Send + Sync {
    /// Returns the DID of the authenticated account.
    fn did(&self) -> &Did;

    /// Returns the handle the account logged in as.
    fn handle(&self) -> &str;

    /// Returns the PDS URL associated with this session.
    fn pds(&self) -> &PdsUrl;

    /// List one page of records in a collection.
    async fn list_records(
        &self,
        repo: &Did,
        collection: &Nsid,
        limit: Option<u32>,
        cursor: Option<&str>,
    ) -> Result<ListRecordsOutput>;

    /// Delete the record at `repo/collection/rkey`.
    async fn delete_record(&self, repo: &Did, collection: &Nsid, rkey: &Rkey) -> Result<()>;
}

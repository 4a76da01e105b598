//! XRPC-backed session implementation.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use likesweep_core::repo::{ListRecordsOutput, Record};
use likesweep_core::traits::Session;
use likesweep_core::types::{AtUri, Did, Nsid, PdsUrl, Rkey};
use likesweep_core::{Error, Result};

use crate::xrpc::{
    DELETE_RECORD, DeleteRecordRequest, LIST_RECORDS, ListRecordsQuery, ListRecordsResponse,
    REFRESH_SESSION, RefreshSessionResponse, XrpcClient,
};

/// Session for an XRPC-backed PDS.
///
/// Cheap to clone; clones share the same HTTP client and tokens. An
/// expired access token is refreshed once and the call retried.
#[derive(Clone)]
pub struct XrpcSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    did: Did,
    handle: String,
    client: XrpcClient,
    tokens: RwLock<Tokens>,
}

struct Tokens {
    access: String,
    refresh: String,
}

impl XrpcSession {
    pub(crate) fn new(
        client: XrpcClient,
        did: Did,
        handle: String,
        access_token: String,
        refresh_token: String,
    ) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                did,
                handle,
                client,
                tokens: RwLock::new(Tokens {
                    access: access_token,
                    refresh: refresh_token,
                }),
            }),
        }
    }

    /// Exchange the refresh token for a fresh token pair.
    #[instrument(skip(self), fields(did = %self.inner.did))]
    pub async fn refresh(&self) -> Result<()> {
        info!("Refreshing session");

        let refresh_token = self.read_tokens(|t| t.refresh.clone());
        let response: RefreshSessionResponse = self
            .inner
            .client
            .procedure_authed_no_body(REFRESH_SESSION, &refresh_token)
            .await?;

        {
            let mut tokens = self
                .inner
                .tokens
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            tokens.access = response.access_jwt;
            tokens.refresh = response.refresh_jwt;
        }

        debug!("Session refreshed successfully");
        Ok(())
    }

    fn read_tokens<T>(&self, f: impl FnOnce(&Tokens) -> T) -> T {
        f(&self
            .inner
            .tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner))
    }

    /// Run `call` with the current access token, refreshing and retrying
    /// once if the server says the token has expired.
    async fn with_token<T, F, Fut>(&self, call: F) -> Result<T>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let token = self.read_tokens(|t| t.access.clone());
        match call(token).await {
            Err(Error::Protocol(e)) if e.is_expired_token() => {
                debug!("Access token expired");
                self.refresh().await?;
                call(self.read_tokens(|t| t.access.clone())).await
            }
            other => other,
        }
    }
}

#[async_trait]
impl Session for XrpcSession {
    fn did(&self) -> &Did {
        &self.inner.did
    }

    fn handle(&self) -> &str {
        &self.inner.handle
    }

    fn pds(&self) -> &PdsUrl {
        self.inner.client.pds()
    }

    #[instrument(skip(self), fields(did = %self.inner.did, %collection))]
    async fn list_records(
        &self,
        repo: &Did,
        collection: &Nsid,
        limit: Option<u32>,
        cursor: Option<&str>,
    ) -> Result<ListRecordsOutput> {
        debug!("Listing records");

        let query = ListRecordsQuery {
            repo: repo.as_str(),
            collection: collection.as_str(),
            limit,
            cursor,
        };

        let response: ListRecordsResponse = self
            .with_token(|token| {
                let query = &query;
                async move {
                    self.inner
                        .client
                        .query_authed(LIST_RECORDS, query, &token)
                        .await
                }
            })
            .await?;

        // A bad entry is dropped on its own; the rest of the page is kept.
        let records = response
            .records
            .into_iter()
            .filter_map(|r| match AtUri::new(&r.uri) {
                Ok(uri) => Some(Record {
                    uri,
                    cid: r.cid,
                    value: r.value,
                }),
                Err(e) => {
                    warn!(uri = %r.uri, error = %e, "Skipping record with malformed URI");
                    None
                }
            })
            .collect();

        Ok(ListRecordsOutput {
            records,
            cursor: response.cursor,
        })
    }

    #[instrument(skip(self), fields(did = %self.inner.did, %collection, %rkey))]
    async fn delete_record(&self, repo: &Did, collection: &Nsid, rkey: &Rkey) -> Result<()> {
        debug!("Deleting record");

        let request = DeleteRecordRequest {
            repo: repo.as_str(),
            collection: collection.as_str(),
            rkey: rkey.as_str(),
        };

        self.with_token(|token| {
            let request = &request;
            async move {
                self.inner
                    .client
                    .procedure_authed_no_response(DELETE_RECORD, request, &token)
                    .await
            }
        })
        .await
    }
}

impl fmt::Debug for XrpcSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XrpcSession")
            .field("did", &self.inner.did)
            .field("handle", &self.inner.handle)
            .field("pds", self.inner.client.pds())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}

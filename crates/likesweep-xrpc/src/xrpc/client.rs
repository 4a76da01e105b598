//! XRPC HTTP client implementation.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use likesweep_core::error::{Error, ProtocolError, TransportError};
use likesweep_core::types::PdsUrl;

use super::endpoints::XrpcErrorResponse;

/// Upper bound for a single XRPC round trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for XRPC requests.
#[derive(Debug, Clone)]
pub struct XrpcClient {
    client: reqwest::Client,
    pds: PdsUrl,
}

impl XrpcClient {
    /// Create a new XRPC client for the given PDS.
    pub fn new(pds: PdsUrl) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("likesweep/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(transport_error)?;

        Ok(Self { client, pds })
    }

    /// Returns the PDS URL this client is configured for.
    pub fn pds(&self) -> &PdsUrl {
        &self.pds
    }

    /// Make an authenticated XRPC query (GET request).
    #[instrument(skip(self, token), fields(pds = %self.pds))]
    pub async fn query_authed<Q, R>(
        &self,
        method: &str,
        params: &Q,
        token: &str,
    ) -> Result<R, Error>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.pds.xrpc_url(method);
        debug!(method, "XRPC authenticated query");
        trace!(?params, "query parameters");

        let response = self
            .client
            .get(&url)
            .query(params)
            .header(AUTHORIZATION, bearer(token))
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// Make an unauthenticated XRPC procedure (POST request).
    ///
    /// The body is not recorded in the span; it may carry a password.
    #[instrument(skip(self, body), fields(pds = %self.pds))]
    pub async fn procedure<B, R>(&self, method: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.pds.xrpc_url(method);
        debug!(method, %url, "XRPC procedure");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// Make an authenticated XRPC procedure whose response body is ignored.
    #[instrument(skip(self, token), fields(pds = %self.pds))]
    pub async fn procedure_authed_no_response<B>(
        &self,
        method: &str,
        body: &B,
        token: &str,
    ) -> Result<(), Error>
    where
        B: Serialize + std::fmt::Debug,
    {
        let url = self.pds.xrpc_url(method);
        debug!(method, "XRPC authenticated procedure (no response)");

        let response = self
            .client
            .post(&url)
            .json(body)
            .header(AUTHORIZATION, bearer(token))
            .send()
            .await
            .map_err(transport_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::Protocol(parse_error_response(response).await))
        }
    }

    /// Make an authenticated XRPC procedure with no request body.
    ///
    /// refreshSession takes the refresh token as its bearer and no body.
    #[instrument(skip(self, token), fields(pds = %self.pds))]
    pub async fn procedure_authed_no_body<R>(&self, method: &str, token: &str) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.pds.xrpc_url(method);
        debug!(method, "XRPC authenticated procedure (no body)");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, bearer(token))
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// Handle an XRPC response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "XRPC response");

        if status.is_success() {
            response.json::<R>().await.map_err(|e| {
                TransportError::Decode {
                    message: e.to_string(),
                }
                .into()
            })
        } else {
            Err(Error::Protocol(parse_error_response(response).await))
        }
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Parse an XRPC error body, falling back to the bare status.
async fn parse_error_response(response: reqwest::Response) -> ProtocolError {
    let status = response.status().as_u16();

    match response.json::<XrpcErrorResponse>().await {
        Ok(body) => ProtocolError::new(status, body.error, body.message),
        Err(_) => ProtocolError::new(status, None, None),
    }
}

/// Classify a reqwest failure.
fn transport_error(err: reqwest::Error) -> Error {
    let message = err.to_string();
    let transport = if err.is_timeout() {
        TransportError::Timeout { message }
    } else if err.is_connect() {
        TransportError::Connection { message }
    } else if err.is_decode() {
        TransportError::Decode { message }
    } else {
        TransportError::Http { message }
    };
    transport.into()
}

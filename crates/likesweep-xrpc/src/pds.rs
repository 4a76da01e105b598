//! XRPC-backed PDS implementation.

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use likesweep_core::error::{AuthError, Error, ProtocolError};
use likesweep_core::traits::Pds;
use likesweep_core::types::{Did, PdsUrl};
use likesweep_core::{Credentials, Result};

use crate::session::XrpcSession;
use crate::xrpc::{CREATE_SESSION, CreateSessionRequest, CreateSessionResponse, XrpcClient};

/// XRPC error codes meaning the credentials were fine but the account
/// cannot be used.
const UNAVAILABLE_CODES: &[&str] = &[
    "AccountTakedown",
    "AccountDeactivated",
    "AuthFactorTokenRequired",
];

/// A network-backed PDS implementation using XRPC.
#[derive(Debug, Clone)]
pub struct XrpcPds {
    client: XrpcClient,
}

impl XrpcPds {
    /// Create a new XRPC PDS for the given PDS URL.
    ///
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be built (e.g. no TLS backend).
    pub fn new(pds: PdsUrl) -> Result<Self> {
        Ok(Self {
            client: XrpcClient::new(pds)?,
        })
    }
}

#[async_trait]
impl Pds for XrpcPds {
    type Session = XrpcSession;

    #[instrument(skip(self), fields(pds = %self.client.pds()))]
    async fn login(&self, credentials: Credentials) -> Result<Self::Session> {
        if credentials.is_incomplete() {
            return Err(AuthError::InvalidCredentials(
                "identifier and password are both required".to_string(),
            )
            .into());
        }

        debug!(identifier = credentials.identifier(), "Creating session");
        let request = CreateSessionRequest {
            identifier: credentials.identifier(),
            password: credentials.password(),
        };

        let response: CreateSessionResponse = self
            .client
            .procedure(CREATE_SESSION, &request)
            .await
            .map_err(classify_login_error)?;

        if response.active == Some(false) {
            return Err(AuthError::AccountUnavailable {
                reason: response
                    .status
                    .unwrap_or_else(|| "account is not active".to_string()),
            }
            .into());
        }

        let did = Did::new(&response.did)?;
        info!(%did, handle = %response.handle, "Session established");

        Ok(XrpcSession::new(
            self.client.clone(),
            did,
            response.handle,
            response.access_jwt,
            response.refresh_jwt,
        ))
    }
}

/// Turn rejected-login protocol errors into [`AuthError`]s.
fn classify_login_error(err: Error) -> Error {
    let Error::Protocol(protocol) = err else {
        return err;
    };

    if let Some(code) = protocol
        .error
        .as_deref()
        .filter(|code| UNAVAILABLE_CODES.contains(code))
    {
        return AuthError::AccountUnavailable {
            reason: describe(&protocol, code),
        }
        .into();
    }

    if protocol.is_auth_error() {
        return AuthError::InvalidCredentials(describe(&protocol, "rejected by server")).into();
    }

    Error::Protocol(protocol)
}

fn describe(protocol: &ProtocolError, fallback: &str) -> String {
    protocol
        .message
        .clone()
        .unwrap_or_else(|| fallback.to_string())
}

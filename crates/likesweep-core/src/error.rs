//! Error types for likesweep.
//!
//! One error enum covers transport, authentication, protocol, input
//! validation and operator prompt failures, so the sweep engine can treat
//! every per-call failure the same way while callers can still match on
//! the variant they care about.

use std::fmt;
use thiserror::Error;

/// The unified error type for likesweep operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (invalid credentials, unavailable account).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Protocol errors (XRPC errors, unexpected responses).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors (invalid DID, NSID, URI format).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The operator prompt could not be read.
    #[error("prompt failed: {message}")]
    Prompt { message: String },
}

impl Error {
    /// Build a prompt error from anything displayable.
    pub fn prompt(message: impl fmt::Display) -> Self {
        Error::Prompt {
            message: message.to_string(),
        }
    }

    /// Returns true if this error means the credentials were rejected.
    pub fn is_auth(&self) -> bool {
        match self {
            Error::Auth(_) => true,
            Error::Protocol(e) => e.is_auth_error(),
            _ => false,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Response body could not be decoded.
    #[error("malformed response: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid credentials provided.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Account is suspended, deactivated, or needs a second factor.
    #[error("account unavailable: {reason}")]
    AccountUnavailable { reason: String },
}

/// Protocol-level errors from XRPC responses.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// XRPC error code (if present).
    pub error: Option<String>,
    /// Error message from the server.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
            || matches!(
                self.error.as_deref(),
                Some("AuthenticationRequired" | "ExpiredToken" | "InvalidToken")
            )
    }

    /// Check if the access token has expired and should be refreshed.
    pub fn is_expired_token(&self) -> bool {
        self.error.as_deref() == Some("ExpiredToken")
    }

    /// Check if the server asked the client to slow down.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429 || self.error.as_deref() == Some("RateLimitExceeded")
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid DID format.
    #[error("invalid DID '{value}': {reason}")]
    Did { value: String, reason: String },

    /// Invalid NSID format.
    #[error("invalid NSID '{value}': {reason}")]
    Nsid { value: String, reason: String },

    /// Invalid AT URI format.
    #[error("invalid AT URI '{value}': {reason}")]
    AtUri { value: String, reason: String },

    /// Invalid PDS URL format.
    #[error("invalid PDS URL '{value}': {reason}")]
    PdsUrl { value: String, reason: String },

    /// Invalid record key format.
    #[error("invalid rkey '{value}': {reason}")]
    Rkey { value: String, reason: String },
}

//! PDS URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// The PDS entryway used when no other server is given.
pub const DEFAULT_PDS: &str = "https://bsky.social";

/// A validated PDS (Personal Data Server) base URL.
///
/// Must use HTTPS; plain HTTP is accepted only for loopback hosts so a
/// local test server can stand in for a real PDS.
///
/// ```
/// use likesweep_core::PdsUrl;
///
/// let pds = PdsUrl::new("https://bsky.social/").unwrap();
/// assert_eq!(
///     pds.xrpc_url("com.atproto.repo.listRecords"),
///     "https://bsky.social/xrpc/com.atproto.repo.listRecords"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PdsUrl(Url);

impl PdsUrl {
    /// Parse and validate a PDS URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is relative, lacks a host, or uses
    /// plain HTTP for a non-loopback host.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let invalid = |reason: String| -> Error {
            InvalidInputError::PdsUrl {
                value: s.to_string(),
                reason,
            }
            .into()
        };

        let url = Url::parse(s).map_err(|e| invalid(e.to_string()))?;

        let Some(host) = url.host_str() else {
            return Err(invalid("must have a host".to_string()));
        };
        let loopback = matches!(host, "localhost" | "127.0.0.1" | "[::1]");

        match url.scheme() {
            "https" => {}
            "http" if loopback => {}
            _ => {
                return Err(invalid(
                    "must use HTTPS (HTTP allowed only for localhost)".to_string(),
                ));
            }
        }

        Ok(Self(url))
    }

    /// Returns the XRPC endpoint URL for a given method.
    pub fn xrpc_url(&self, method: &str) -> String {
        format!("{}/xrpc/{}", self.0.as_str().trim_end_matches('/'), method)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

}

impl fmt::Display for PdsUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str().trim_end_matches('/'))
    }
}

impl FromStr for PdsUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for PdsUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PdsUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PdsUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn https_url() {
        let pds = PdsUrl::new("https://bsky.social").unwrap();
        assert_eq!(pds.to_string(), "https://bsky.social");
    }

    #[test]
    fn localhost_http_allowed() {
        assert!(PdsUrl::new("http://localhost:2583").is_ok());
        assert!(PdsUrl::new("http://127.0.0.1:2583").is_ok());
    }

    #[test]
    fn xrpc_url_ignores_trailing_slash() {
        for base in ["https://pds.example.com", "https://pds.example.com/"] {
            assert_eq!(
                PdsUrl::new(base)
                    .unwrap()
                    .xrpc_url("com.atproto.server.createSession"),
                "https://pds.example.com/xrpc/com.atproto.server.createSession"
            );
        }
    }

    #[test]
    fn rejects_insecure_and_relative() {
        assert!(PdsUrl::new("http://bsky.social").is_err());
        assert!(PdsUrl::new("/xrpc/method").is_err());
        assert!(PdsUrl::new("file:///tmp/pds").is_err());
    }

    #[test]
    fn default_pds_is_valid() {
        assert_eq!(PdsUrl::new(DEFAULT_PDS).unwrap().to_string(), DEFAULT_PDS);
    }
}

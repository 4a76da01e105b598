//! AT URI type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Did, Nsid, Rkey};
use crate::error::{Error, InvalidInputError};

/// A validated `at://<repo>/<collection>/<rkey>` record URI.
///
/// The record key is the final path segment. Record keys cannot contain
/// `/`, so a URI with more than three path components is rejected rather
/// than silently truncated.
///
/// ```
/// use likesweep_core::AtUri;
///
/// let uri: AtUri = "at://did:plc:z72i7hdynmk6r22z27h6tvur/app.bsky.feed.like/3jui7kd54zh2y"
///     .parse()
///     .unwrap();
/// assert_eq!(uri.rkey().as_str(), "3jui7kd54zh2y");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AtUri {
    repo: Did,
    collection: Nsid,
    rkey: Rkey,
}

impl AtUri {
    /// Parse an AT URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `at://<did>/<nsid>/<rkey>`.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let invalid = |reason: String| -> Error {
            InvalidInputError::AtUri {
                value: s.to_string(),
                reason,
            }
            .into()
        };

        let path = s
            .strip_prefix("at://")
            .ok_or_else(|| invalid("must start with 'at://'".to_string()))?;

        let (rest, rkey) = path
            .rsplit_once('/')
            .ok_or_else(|| invalid("missing record key".to_string()))?;
        let (repo, collection) = rest
            .split_once('/')
            .ok_or_else(|| invalid("missing collection".to_string()))?;

        Ok(Self {
            repo: Did::new(repo).map_err(|e| invalid(e.to_string()))?,
            collection: Nsid::new(collection).map_err(|e| invalid(e.to_string()))?,
            rkey: Rkey::new(rkey).map_err(|e| invalid(e.to_string()))?,
        })
    }

    /// Returns the record key.
    pub fn rkey(&self) -> &Rkey {
        &self.rkey
    }
}

impl fmt::Display for AtUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at://{}/{}/{}", self.repo, self.collection, self.rkey)
    }
}

impl FromStr for AtUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for AtUri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AtUri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AtUri::new(&s).map_err(serde::de::Error::custom)
    }
}

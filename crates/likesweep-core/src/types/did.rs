//! Decentralized Identifier (DID) type.

use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};

/// A validated Decentralized Identifier.
///
/// Every account repository is addressed by its DID, never by its handle,
/// so list and delete calls are always scoped to one of these.
///
/// ```
/// use likesweep_core::Did;
///
/// let did = Did::new("did:plc:z72i7hdynmk6r22z27h6tvur").unwrap();
/// assert_eq!(did.to_string(), "did:plc:z72i7hdynmk6r22z27h6tvur");
/// assert!(Did::new("alice.bsky.social").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Did(String);

validated_string!(Did);

impl Did {
    fn validate(s: &str) -> Result<(), Error> {
        let invalid = |reason: &str| -> Error {
            InvalidInputError::Did {
                value: s.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        let rest = s
            .strip_prefix("did:")
            .ok_or_else(|| invalid("must start with 'did:'"))?;
        let (method, identifier) = rest
            .split_once(':')
            .ok_or_else(|| invalid("must have format 'did:<method>:<identifier>'"))?;

        if method.is_empty() || !method.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(invalid("method must be non-empty lowercase letters"));
        }
        if identifier.is_empty() {
            return Err(invalid("identifier must be non-empty"));
        }
        if s.len() > 2048 {
            return Err(invalid("exceeds maximum length of 2048 characters"));
        }

        Ok(())
    }
}

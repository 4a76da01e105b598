//! Namespaced Identifier (NSID) type.

use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};

/// The collection holding an account's like records.
pub const LIKE_COLLECTION: &str = "app.bsky.feed.like";

/// A validated Namespaced Identifier, used here to name collections.
///
/// ```
/// use likesweep_core::Nsid;
///
/// let nsid = Nsid::likes();
/// assert_eq!(nsid.as_str(), "app.bsky.feed.like");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Nsid(String);

validated_string!(Nsid);

impl Nsid {
    /// The like collection, `app.bsky.feed.like`.
    pub fn likes() -> Self {
        Self(LIKE_COLLECTION.to_string())
    }

    fn validate(s: &str) -> Result<(), Error> {
        let invalid = |reason: String| -> Error {
            InvalidInputError::Nsid {
                value: s.to_string(),
                reason,
            }
            .into()
        };

        if s.len() > 317 {
            return Err(invalid(
                "exceeds maximum length of 317 characters".to_string(),
            ));
        }

        let segments: Vec<&str> = s.split('.').collect();
        if segments.len() < 3 {
            return Err(invalid("must have at least 3 segments".to_string()));
        }

        for segment in segments {
            let Some(first) = segment.chars().next() else {
                return Err(invalid("contains an empty segment".to_string()));
            };
            if !first.is_ascii_alphabetic() {
                return Err(invalid(format!(
                    "segment '{segment}' must start with a letter"
                )));
            }
            if let Some(c) = segment
                .chars()
                .find(|c| !c.is_ascii_alphanumeric() && *c != '-')
            {
                return Err(invalid(format!(
                    "segment '{segment}' contains invalid character '{c}'"
                )));
            }
        }

        Ok(())
    }
}

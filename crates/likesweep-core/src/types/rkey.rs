//! Record Key (rkey) type.

use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};

/// Length of a timestamp identifier (TID).
const TID_LEN: usize = 13;

/// Alphabet of the sortable base32 encoding used by TIDs.
const TID_ALPHABET: &str = "234567abcdefghijklmnopqrstuvwxyz";

/// A validated record key: the address of one record inside a collection.
///
/// ```
/// use likesweep_core::Rkey;
///
/// let rkey = Rkey::new("3jui7kd54zh2y").unwrap();
/// assert!(rkey.is_tid());
/// assert!(!Rkey::new("self").unwrap().is_tid());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rkey(String);

validated_string!(Rkey);

impl Rkey {
    /// Returns true if this key has the shape of a timestamp identifier.
    ///
    /// Like records are created with TID keys, so anything else in the
    /// like collection was written by an unusual client.
    pub fn is_tid(&self) -> bool {
        self.0.len() == TID_LEN
            && self.0.chars().all(|c| TID_ALPHABET.contains(c))
            && !matches!(self.0.as_bytes()[0], b'k'..=b'z')
    }

    fn validate(s: &str) -> Result<(), Error> {
        let invalid = |reason: String| -> Error {
            InvalidInputError::Rkey {
                value: s.to_string(),
                reason,
            }
            .into()
        };

        if s.is_empty() || s.len() > 512 {
            return Err(invalid("must be 1 to 512 characters".to_string()));
        }
        if s == "." || s == ".." {
            return Err(invalid("cannot be '.' or '..'".to_string()));
        }
        if let Some(c) = s
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '.' | '-' | '_' | '~' | ':'))
        {
            return Err(invalid(format!("contains invalid character '{c}'")));
        }

        Ok(())
    }
}

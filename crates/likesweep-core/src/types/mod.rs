//! Core AT Protocol types.
//!
//! These types enforce protocol invariants at construction time,
//! ensuring invalid states are unrepresentable.

/// Implements the string plumbing shared by validated identifier newtypes.
///
/// The type must be a tuple struct over `String` with an associated
/// `fn validate(&str) -> Result<(), Error>`.
macro_rules! validated_string {
    ($name:ident) => {
        impl $name {
            /// Create a new value from a string, validating the format.
            ///
            /// # Errors
            ///
            /// Returns [`Error::InvalidInput`](crate::Error::InvalidInput)
            /// if the string is malformed.
            pub fn new(s: impl Into<String>) -> Result<Self, crate::Error> {
                let s = s.into();
                Self::validate(&s)?;
                Ok(Self(s))
            }

            /// Returns the underlying string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = crate::Error;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

mod at_uri;
mod did;
mod nsid;
mod pds_url;
mod rkey;

pub use at_uri::AtUri;
pub use did::Did;
pub use nsid::{LIKE_COLLECTION, Nsid};
pub use pds_url::{DEFAULT_PDS, PdsUrl};
pub use rkey::Rkey;

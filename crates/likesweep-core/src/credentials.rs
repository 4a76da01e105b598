//! Login credentials type.

use std::fmt;

/// Login credentials for AT Protocol authentication.
///
/// Holds the identifier (handle or DID) and secret (password or app
/// password) exchanged for a session. The secret is never exposed in
/// `Debug` output.
///
/// # Example
///
/// ```
/// use likesweep_core::Credentials;
///
/// let creds = Credentials::new("@alice.bsky.social ", "app-password-here");
/// assert_eq!(creds.identifier(), "alice.bsky.social");
/// ```
#[derive(Clone)]
pub struct Credentials {
    identifier: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    ///
    /// Surrounding whitespace is trimmed from both values and a leading `@`
    /// is stripped from the identifier, so `@alice.bsky.social` and
    /// `alice.bsky.social` log in as the same account.
    pub fn new(identifier: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        let identifier = identifier.as_ref().trim();
        Self {
            identifier: identifier
                .strip_prefix('@')
                .unwrap_or(identifier)
                .to_string(),
            password: password.as_ref().trim().to_string(),
        }
    }

    /// Returns the identifier (handle or DID).
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the password.
    ///
    /// Use this only when constructing authentication requests.
    /// Never log or display this value.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns true if either half is missing.
    pub fn is_incomplete(&self) -> bool {
        self.identifier.is_empty() || self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

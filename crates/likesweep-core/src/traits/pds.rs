//! PDS trait.

use async_trait::async_trait;

use crate::{Credentials, Result};

use super::Session;

/// A PDS that can exchange credentials for a session.
#[async_trait]
pub trait Pds: Send + Sync {
    /// Session type for this PDS.
    type Session: Session;

    /// Authenticate with the PDS and create a new session.
    async fn login(&self, credentials: Credentials) -> Result<Self::Session>;
}

//! Session establishment.

use anyhow::{Context, Result};

use likesweep_core::{Pds, PdsUrl, Prompter, Session};
use likesweep_xrpc::{XrpcPds, XrpcSession};

use crate::output;

/// Prompt for credentials and log in to `pds_url`.
///
/// There is no retry: a rejected login is returned as an error and the
/// process ends.
pub async fn establish(pds_url: PdsUrl, prompter: &dyn Prompter) -> Result<XrpcSession> {
    output::step(&format!("Connecting to {pds_url}..."));

    let credentials = prompter
        .credentials()
        .await
        .context("Failed to read credentials")?;
    let pds = XrpcPds::new(pds_url).context("Failed to set up HTTP client")?;

    let session = match pds.login(credentials).await {
        Ok(session) => session,
        Err(err) if err.is_auth() => {
            return Err(err).context("Authentication error. Please verify your handle and password");
        }
        Err(err) => return Err(err).context("Failed to login"),
    };

    output::success(&format!("Authenticated as @{}", session.handle()));
    output::field("DID", session.did().as_str());

    Ok(session)
}

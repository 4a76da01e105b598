//! The interactive sweep: log in, list likes, confirm, delete.

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use likesweep_core::{ListingStats, Nsid, PdsUrl, collect_all, delete_all};

use crate::cli::Cli;
use crate::output::{self, ConsoleReporter};
use crate::prompt::ConsolePrompter;
use crate::session;

pub async fn run(cli: Cli) -> Result<()> {
    let pds_url = PdsUrl::new(&cli.pds).context("Invalid PDS URL")?;
    let config = cli.sweep_config();
    let prompter = ConsolePrompter::new(cli.identifier);
    let reporter = ConsoleReporter;
    let collection = Nsid::likes();
    debug!(pds = %pds_url, ?config, "Starting sweep");

    output::banner();

    let session = session::establish(pds_url, &prompter).await?;

    output::step("Getting like records...");
    let listing = collect_all(&session, &collection, &config, &reporter).await;

    if let Some(cause) = &listing.stopped {
        if listing.is_empty() {
            bail!("Could not list like records: {cause}");
        }
        output::warn(&format!(
            "Listing stopped early; only the {} like records found so far will be processed.",
            listing.len()
        ));
    } else {
        output::success(&format!("Total like records found: {}", listing.len()));
    }

    if listing.is_empty() {
        println!();
        output::success("You have no likes to delete. Your account is already clean!");
        return Ok(());
    }

    output::preview(&ListingStats::from_records(&listing.records));

    let outcome = delete_all(
        &session,
        &collection,
        &listing.records,
        &prompter,
        &reporter,
        &config,
    )
    .await
    .context("Deletion aborted")?;

    info!(?outcome, "Sweep finished");
    output::summary(&outcome, listing.len());
    Ok(())
}

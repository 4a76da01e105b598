//! CLI argument definitions.

use std::time::Duration;

use clap::Parser;

use likesweep_core::{DEFAULT_PDS, SweepConfig};

/// Remove every like from a Bluesky account.
///
/// Logs in, lists all like records, asks for confirmation, then deletes
/// them one by one. The liked posts themselves are not affected.
#[derive(Parser, Debug)]
#[command(name = "likesweep")]
#[command(author, version = env!("LIKESWEEP_VERSION"), about, long_about)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// PDS base URL
    #[arg(long, default_value = DEFAULT_PDS)]
    pub pds: String,

    /// Handle or DID to log in as (prompted for if omitted)
    #[arg(long)]
    pub identifier: Option<String>,

    /// Pause between listing requests, in milliseconds
    #[arg(long, default_value_t = 100)]
    pub list_delay_ms: u64,

    /// Pause after each delete, in milliseconds
    #[arg(long, default_value_t = 200)]
    pub delete_delay_ms: u64,
}

impl Cli {
    /// Engine settings derived from the flags.
    pub fn sweep_config(&self) -> SweepConfig {
        SweepConfig {
            list_delay: Duration::from_millis(self.list_delay_ms),
            delete_delay: Duration::from_millis(self.delete_delay_ms),
            ..SweepConfig::default()
        }
    }
}

//! likesweep - remove every like from a Bluesky account.
//!
//! A thin interactive shell over `likesweep-core`: it wires the XRPC
//! session, console prompts and console reporting into one sweep.

mod cli;
mod output;
mod prompt;
mod session;
mod sweep;
mod tty;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // Help and version go to stdout and succeed; usage errors fail.
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    let terminal = tty::TerminalState::capture();

    tokio::select! {
        result = sweep::run(cli) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                output::error(&format!("{err:#}"));
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            if let Some(terminal) = &terminal {
                terminal.restore();
            }
            eprintln!();
            output::warn("Process interrupted by user.");
            // A prompt may still hold the terminal on the blocking pool;
            // exit without waiting for it.
            std::process::exit(0);
        }
    }
}

fn init_logging(verbosity: u8, json: bool) {
    // Warnings are already shown by the console reporter.
    let filter = match verbosity {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

//! Output formatting helpers and the console reporter.

use chrono::{DateTime, Utc};
use colored::Colorize;

use likesweep_core::{DeleteOutcome, Error, ListingStats, Progress, Record, Reporter};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a warning.
pub fn warn(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print the start of a phase.
pub fn step(msg: &str) {
    println!();
    println!("{}", msg.bold());
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("  {}: {}", label.dimmed(), value);
}

pub fn banner() {
    let rule = "=".repeat(40);
    println!("{}", "BLUESKY LIKE REMOVER".bold());
    println!("{}", rule.dimmed());
    println!("This will remove ALL likes from your account.");
    println!("{}", "This action is NOT reversible.".yellow());
    println!("{}", rule.dimmed());
}

/// Print what is about to be deleted.
pub fn preview(stats: &ListingStats) {
    step("Your likes:");
    field("Like records", &stats.total.to_string());
    field("With timestamp keys", &stats.tid_keys.to_string());
    if let Some(range) = date_range(stats.oldest, stats.newest) {
        field("Created", &range);
    }
    println!(
        "  {}",
        "Only the like records are deleted, not the posts they point to.".dimmed()
    );
}

/// Print the final result of a deletion run over `total` records.
pub fn summary(outcome: &DeleteOutcome, total: usize) {
    match outcome {
        DeleteOutcome::Empty => println!("No likes to delete."),
        DeleteOutcome::Declined => warn("Cancelled by user."),
        DeleteOutcome::Finished(tally) | DeleteOutcome::Halted(tally) => {
            step("Process completed:");
            field("Likes deleted", &tally.deleted.to_string());
            field("Errors", &tally.errors.to_string());
            if matches!(outcome, DeleteOutcome::Halted(_)) {
                warn(&format!(
                    "Stopped early; {} likes were left untouched.",
                    tally.untouched(total)
                ));
            }
        }
    }
}

fn date_range(oldest: Option<DateTime<Utc>>, newest: Option<DateTime<Utc>>) -> Option<String> {
    let fmt = |at: DateTime<Utc>| at.format("%Y-%m-%d").to_string();
    match (oldest, newest) {
        (Some(oldest), Some(newest)) if oldest.date_naive() == newest.date_naive() => {
            Some(fmt(oldest))
        }
        (Some(oldest), Some(newest)) => Some(format!("{} to {}", fmt(oldest), fmt(newest))),
        _ => None,
    }
}

/// Prints sweep events to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn page_collected(&self, total: usize) {
        println!("  {}", format!("Retrieved {total} like records so far...").dimmed());
    }

    fn listing_stopped(&self, collected: usize, cause: &Error) {
        error(&format!(
            "Error getting like records after {collected}: {cause}"
        ));
    }

    fn deletion_started(&self, total: usize) {
        step(&format!("Deleting {total} like records..."));
    }

    fn delete_failed(&self, index: usize, record: &Record, cause: &Error) {
        warn(&format!("Error deleting like #{index} ({}): {cause}", record.rkey()));
        if let Error::Protocol(protocol) = cause
            && protocol.is_rate_limited()
        {
            warn("The server is rate limiting; consider a larger --delete-delay-ms.");
        }
    }

    fn progress(&self, progress: &Progress) {
        println!("  Progress: {progress}");
    }

    fn breaker_tripped(&self, progress: &Progress) {
        warn(&format!(
            "{} of {} attempts failed ({:.1}%).",
            progress.errors,
            progress.index,
            progress.error_ratio() * 100.0
        ));
    }
}

//! The sweep engine: drain a listing, then delete every entry.
//!
//! [`collect_all`] takes a fixed snapshot of a collection by following
//! cursors until the listing is exhausted. [`delete_all`] then walks that
//! snapshot in order, one delete per record, tallying outcomes and asking
//! the operator whether to go on once the error rate gets too high.
//! Both phases are strictly sequential and throttle themselves with the
//! fixed delays in [`SweepConfig`].

mod breaker;
mod collect;
mod config;
mod delete;
mod progress;
mod stats;

pub use breaker::CircuitBreaker;
pub use collect::{Listing, collect_all};
pub use config::SweepConfig;
pub use delete::{DeleteOutcome, Tally, delete_all};
pub use progress::Progress;
pub use stats::ListingStats;

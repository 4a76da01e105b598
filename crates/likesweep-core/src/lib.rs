//! likesweep-core - types, traits and the sweep engine.
//!
//! The engine is written against two seams: [`Session`] for the remote
//! repository and [`Prompter`] / [`Reporter`] for the operator. Network
//! sessions live in `likesweep-xrpc`; console prompts live in the CLI.

pub mod credentials;
pub mod error;
pub mod repo;
pub mod sweep;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use repo::{ListRecordsOutput, Record};
pub use sweep::{
    CircuitBreaker, DeleteOutcome, Listing, ListingStats, Progress, SweepConfig, Tally,
    collect_all, delete_all,
};
pub use traits::{NoopReporter, Pds, Prompter, Reporter, Session, is_affirmative};
pub use types::{AtUri, DEFAULT_PDS, Did, LIKE_COLLECTION, Nsid, PdsUrl, Rkey};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

//! Core traits: the repository boundary and the operator boundary.

mod pds;
mod prompter;
mod reporter;
mod session;

pub use pds::Pds;
pub use prompter::{Prompter, is_affirmative};
pub use reporter::{NoopReporter, Reporter};
pub use session::Session;

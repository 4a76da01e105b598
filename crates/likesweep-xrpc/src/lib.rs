//! likesweep-xrpc - XRPC-backed PDS implementation.
//!
//! Speaks the three endpoints a sweep needs: `createSession`,
//! `listRecords` and `deleteRecord`.

mod pds;
mod session;
mod xrpc;

pub use pds::XrpcPds;
pub use session::XrpcSession;

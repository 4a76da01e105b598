//! XRPC client implementation.

mod client;
mod endpoints;

pub(crate) use client::XrpcClient;
pub(crate) use endpoints::*;

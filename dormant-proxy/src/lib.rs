// Copyright (c) 2022 MASSA LABS <info@massa.net>
//! Activity-aware reverse proxy placed in front of the managed node.
//!
//! Every request (or websocket frame) outside the allowlist counts as
//! activity, wakes the node up if it sleeps and, for private transactions,
//! makes sure the nodes of the other participants are awake too before the
//! payload is relayed upstream.
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

mod config;
mod error;
mod gate;
mod http;
mod private_tx;
mod server;
mod ws;

pub use config::{ProxyConfig, ProxyKind};
pub use error::ProxyError;
pub use private_tx::private_for_keys;
pub use server::{start_proxy, ProxyStopHandle};

#[cfg(test)]
mod tests;

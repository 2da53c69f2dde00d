// Copyright (c) 2022 MASSA LABS <info@massa.net>

use displaydoc::Display;
use thiserror::Error;

/// Errors of the peer coordination
#[non_exhaustive]
#[derive(Display, Error, Debug, Clone)]
pub enum PeerError {
    /// peer roster error: {0}
    RosterError(String),
    /// call to peer {0} failed: {1}
    RpcError(String, String),
    /// only {received} peers answered out of {expected}
    MissingResponses {
        /// peers queried
        expected: usize,
        /// answers received
        received: usize,
    },
    /// peer {0} is shutting down
    PeerShuttingDown(String),
    /// internal error: {0}
    InternalError(String),
}

impl From<config::ConfigError> for PeerError {
    fn from(err: config::ConfigError) -> Self {
        PeerError::RosterError(err.to_string())
    }
}

// Copyright (c) 2022 MASSA LABS <info@massa.net>
//! Coordination with the sibling node-managers of the cluster.
//!
//! Before stopping, a node-manager asks every peer for its status and refuses to
//! go down when a peer does not answer or is itself going down. Before a private
//! transaction is forwarded, the peers managing its participants are asked to
//! wake their node up.
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

mod config;
mod controller_impl;
mod controller_traits;
mod error;
mod fan_out;
mod roster;
mod rpc;

pub use config::PeersConfig;
pub use controller_impl::PeerCoordinatorImpl;
pub use controller_traits::{PeerCoordinator, PeerRpc};
pub use error::PeerError;
pub use roster::PeerRoster;
pub use rpc::JsonRpcPeerClient;

#[cfg(any(test, feature = "test-exports"))]
pub use controller_traits::{MockPeerCoordinator, MockPeerRpc};

#[cfg(test)]
mod tests;

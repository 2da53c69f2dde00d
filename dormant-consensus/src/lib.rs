// Copyright (c) 2022 MASSA LABS <info@massa.net>
//! Consensus safety checks: can this node be stopped right now without
//! endangering the liveness of the cluster?
//!
//! The algorithm is chosen once from the configuration. Every check fetches
//! fresh state from the blockchain client and applies the fault tolerance
//! bound of the algorithm; nothing is cached between two checks.
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

mod besu_clique;
mod clique;
mod config;
mod controller_traits;
mod error;
mod istanbul;
mod raft;
mod rpc;
mod types;
mod validator;

pub use config::{ConsensusConfig, ConsensusKind};
pub use controller_traits::{ClientRpc, ConsensusValidator};
pub use error::ConsensusError;
pub use rpc::JsonRpcClient;
pub use types::{CliqueStatus, IstanbulStatus, RaftClusterMember, SignerMetric};
pub use validator::ConsensusValidatorImpl;

#[cfg(any(test, feature = "test-exports"))]
pub use controller_traits::{MockClientRpc, MockConsensusValidator};

// Copyright (c) 2022 MASSA LABS <info@massa.net>

use displaydoc::Display;
use thiserror::Error;

/// Reasons a shutdown is refused
#[non_exhaustive]
#[derive(Display, Error, Debug)]
pub enum ConsensusError {
    /// could not build the blockchain client RPC client: {0}
    ClientError(String),
    /// RPC call {0} failed: {1}
    RpcError(String, String),
    /// unexpected response to {0}: {1}
    InvalidResponse(String, String),
    /// raft: this node is the minter, it cannot be shut down
    RaftMinter,
    /// raft: only {active} active nodes out of {total}, shutting down this node would break the quorum
    RaftQuorum {
        /// active nodes
        active: usize,
        /// cluster size
        total: usize,
    },
    /// minting not started, cannot decide whether the network can afford this node going down
    MintingNotStarted,
    /// istanbul: {down} validators potentially down out of {total}, shutting down this node would stall the network
    IstanbulQuorum {
        /// other validators lagging behind
        down: usize,
        /// validator set size
        total: usize,
    },
    /// clique: {down} signers potentially down out of {total}, shutting down this node would stall the network
    CliqueMajority {
        /// other signers lagging behind
        down: usize,
        /// signer set size
        total: usize,
    },
}

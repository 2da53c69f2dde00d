// Copyright (c) 2022 MASSA LABS <info@massa.net>

use dormant_time::DormantTime;
use serde::Deserialize;
use std::fmt;

/// Consensus algorithm of the managed blockchain client
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ConsensusKind {
    /// quorum raft
    Raft,
    /// istanbul BFT
    Istanbul,
    /// geth-style clique proof of authority
    Clique,
    /// besu clique proof of authority
    BesuClique,
}

impl fmt::Display for ConsensusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConsensusKind::Raft => "raft",
            ConsensusKind::Istanbul => "istanbul",
            ConsensusKind::Clique => "clique",
            ConsensusKind::BesuClique => "besu-clique",
        };
        write!(f, "{}", s)
    }
}

/// Consensus check settings
#[derive(Debug, Deserialize, Clone)]
pub struct ConsensusConfig {
    /// algorithm
    pub kind: ConsensusKind,
    /// JSON-RPC url of the blockchain client
    pub rpc_url: String,
    /// timeout of one RPC call
    pub rpc_timeout: DormantTime,
}

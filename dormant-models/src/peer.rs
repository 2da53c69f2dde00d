// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::NodeState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A sibling node-manager as listed in the peer roster file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PeerDescriptor {
    /// peer node-manager name
    pub name: String,
    /// public key of the privacy manager of the peer node
    pub privacy_manager_key: String,
    /// url of the peer control RPC
    pub rpc_url: String,
}

/// Status of a node as exposed by its control RPC. Counters are in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStatusReport {
    /// node state
    pub status: NodeState,
    /// inactivity threshold after which the node is stopped
    pub inactive_time_limit: u64,
    /// current inactivity
    pub inactive_time: u64,
    /// time left before the node is stopped, 0 when it is not up
    pub time_to_shutdown: u64,
}

impl fmt::Display for NodeStatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "status: {} / inactive: {}s of {}s / shutdown in: {}s",
            self.status, self.inactive_time, self.inactive_time_limit, self.time_to_shutdown
        )
    }
}

/// Status report received from a peer during a coordination round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerStatusReport {
    /// name of the peer that answered
    pub peer: String,
    /// what it answered
    pub report: NodeStatusReport,
}

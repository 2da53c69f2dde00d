// Copyright (c) 2022 MASSA LABS <info@massa.net>

use dormant_time::DormantTime;
use serde::Deserialize;
use std::path::PathBuf;

/// Peer coordination settings
#[derive(Debug, Deserialize, Clone)]
pub struct PeersConfig {
    /// name of this node-manager, as listed in the roster
    pub self_name: String,
    /// roster file, reloaded on every coordination round
    pub peers_file: PathBuf,
    /// timeout of one call to a peer
    pub rpc_timeout: DormantTime,
}

// Copyright (c) 2022 MASSA LABS <info@massa.net>

use dormant_models::{NodeState, NodeStatusReport, PeerDescriptor};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;

use crate::{MockPeerRpc, PeerCoordinatorImpl, PeerRoster};

pub const SELF_NAME: &str = "node1";

pub fn peer(index: usize) -> PeerDescriptor {
    PeerDescriptor {
        name: format!("node{}", index),
        privacy_manager_key: format!("key{}=", index),
        rpc_url: format!("http://127.0.0.1:{}", 8080 + index),
    }
}

pub fn roster_toml(peers: &[PeerDescriptor]) -> String {
    peers
        .iter()
        .map(|p| {
            format!(
                "[[peers]]\nname = \"{}\"\nprivacy_manager_key = \"{}\"\nrpc_url = \"{}\"\n\n",
                p.name, p.privacy_manager_key, p.rpc_url
            )
        })
        .collect()
}

pub fn write_roster(path: &Path, peers: &[PeerDescriptor]) {
    std::fs::write(path, roster_toml(peers)).unwrap();
}

pub fn roster_file(peers: &[PeerDescriptor]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(roster_toml(peers).as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn report(status: NodeState) -> NodeStatusReport {
    NodeStatusReport {
        status,
        inactive_time_limit: 60,
        inactive_time: 5,
        time_to_shutdown: 55,
    }
}

/// Coordinator for `node1` over a roster of `count` nodes, `node1` included.
/// The roster file must outlive the coordinator.
pub fn coordinator(count: usize, rpc: MockPeerRpc) -> (PeerCoordinatorImpl, NamedTempFile) {
    let peers: Vec<PeerDescriptor> = (1..=count).map(peer).collect();
    let file = roster_file(&peers);
    let roster = PeerRoster::load(file.path()).unwrap();
    (
        PeerCoordinatorImpl::new(SELF_NAME.to_string(), roster, Arc::new(rpc)),
        file,
    )
}

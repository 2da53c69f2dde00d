// Copyright (c) 2022 MASSA LABS <info@massa.net>

use dormant_models::PeerDescriptor;
use parking_lot::RwLock;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::PeerError;

#[derive(Debug, Deserialize)]
struct RosterFile {
    #[serde(default)]
    peers: Vec<PeerDescriptor>,
}

/// Hot-reloadable list of the sibling node-managers.
///
/// The file is read again on every coordination round. A file that can no
/// longer be read or parsed leaves the last good list in place.
pub struct PeerRoster {
    path: PathBuf,
    peers: RwLock<Arc<Vec<PeerDescriptor>>>,
}

impl PeerRoster {
    /// Load the roster. The first load must succeed.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, PeerError> {
        let path = path.into();
        let peers = read_roster(&path)?;
        debug!("loaded {} peers from {}", peers.len(), path.display());
        Ok(PeerRoster {
            path,
            peers: RwLock::new(Arc::new(peers)),
        })
    }

    /// Re-read the file and return the resulting list.
    pub fn reload(&self) -> Arc<Vec<PeerDescriptor>> {
        match read_roster(&self.path) {
            Ok(peers) => {
                *self.peers.write() = Arc::new(peers);
            }
            Err(err) => warn!(
                "could not reload peer roster {}, keeping the last good one: {}",
                self.path.display(),
                err
            ),
        }
        self.current()
    }

    /// Last good list, without touching the file
    pub fn current(&self) -> Arc<Vec<PeerDescriptor>> {
        self.peers.read().clone()
    }
}

fn read_roster(path: &Path) -> Result<Vec<PeerDescriptor>, PeerError> {
    let file: RosterFile = config::Config::builder()
        .add_source(config::File::from(path).format(config::FileFormat::Toml))
        .build()?
        .try_deserialize()?;
    let mut names = HashSet::with_capacity(file.peers.len());
    for peer in &file.peers {
        if peer.name.is_empty() || peer.rpc_url.is_empty() {
            return Err(PeerError::RosterError(format!(
                "{}: every peer needs a name and an rpc_url",
                path.display()
            )));
        }
        if !names.insert(peer.name.as_str()) {
            return Err(PeerError::RosterError(format!(
                "{}: peer {} listed twice",
                path.display(),
                peer.name
            )));
        }
    }
    Ok(file.peers)
}

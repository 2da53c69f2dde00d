// Copyright (c) 2022 MASSA LABS <info@massa.net>

use async_trait::async_trait;
use dormant_models::{PeerDescriptor, PeerStatusReport};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::fan_out::fan_out;
use crate::{PeerCoordinator, PeerError, PeerRoster, PeerRpc};

/// Coordinates with the peers listed in the roster
pub struct PeerCoordinatorImpl {
    self_name: String,
    roster: PeerRoster,
    rpc: Arc<dyn PeerRpc>,
}

impl PeerCoordinatorImpl {
    /// `self_name` is the roster entry of this node-manager, never queried
    pub fn new(self_name: String, roster: PeerRoster, rpc: Arc<dyn PeerRpc>) -> Self {
        PeerCoordinatorImpl {
            self_name,
            roster,
            rpc,
        }
    }

    fn is_self(&self, peer: &PeerDescriptor) -> bool {
        peer.name == self.self_name
    }
}

#[async_trait]
impl PeerCoordinator for PeerCoordinatorImpl {
    async fn validate_peers(&self) -> Result<Vec<PeerStatusReport>, PeerError> {
        let peers: Vec<PeerDescriptor> = self
            .roster
            .reload()
            .iter()
            .filter(|peer| !self.is_self(peer))
            .cloned()
            .collect();
        let expected = peers.len();
        debug!("querying the status of {} peers", expected);

        let rpc = self.rpc.clone();
        let client_id = self.self_name.clone();
        let answers = fan_out(peers, move |peer| {
            let rpc = rpc.clone();
            let client_id = client_id.clone();
            async move { rpc.node_status(&peer, &client_id).await }
        })
        .await?;

        if answers.len() < expected {
            return Err(PeerError::MissingResponses {
                expected,
                received: answers.len(),
            });
        }
        let reports: Vec<PeerStatusReport> = answers
            .into_iter()
            .map(|(peer, report)| PeerStatusReport { peer, report })
            .collect();
        if let Some(leaving) = reports.iter().find(|r| r.report.status.is_shutting_down()) {
            info!(
                "peer {} is {}, this node must stay up",
                leaving.peer, leaving.report.status
            );
            return Err(PeerError::PeerShuttingDown(leaving.peer.clone()));
        }
        Ok(reports)
    }

    async fn validate_peer_private_tx_status(
        &self,
        participant_keys: Vec<String>,
    ) -> Result<bool, PeerError> {
        let roster = self.roster.reload();
        let mut selected = HashSet::new();
        let mut peers = Vec::new();
        for key in &participant_keys {
            match roster.iter().find(|p| &p.privacy_manager_key == key) {
                None => debug!("no peer manages participant {}, skipped", key),
                Some(peer) if self.is_self(peer) => {}
                Some(peer) => {
                    if selected.insert(peer.name.clone()) {
                        peers.push(peer.clone());
                    }
                }
            }
        }
        let expected = peers.len();
        debug!(
            "{} of {} private tx participants are managed by peers",
            expected,
            participant_keys.len()
        );

        let rpc = self.rpc.clone();
        let client_id = self.self_name.clone();
        let answers = fan_out(peers, move |peer| {
            let rpc = rpc.clone();
            let client_id = client_id.clone();
            async move { rpc.prepare_for_private_tx(&peer, &client_id).await }
        })
        .await?;

        if answers.len() < expected {
            return Err(PeerError::MissingResponses {
                expected,
                received: answers.len(),
            });
        }
        let not_ready: Vec<&str> = answers
            .iter()
            .filter(|(_, ready)| !ready)
            .map(|(peer, _)| peer.as_str())
            .collect();
        if !not_ready.is_empty() {
            warn!("peers not ready for private tx: {}", not_ready.join(", "));
            return Ok(false);
        }
        Ok(true)
    }
}

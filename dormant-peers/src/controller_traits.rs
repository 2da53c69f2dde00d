// Copyright (c) 2022 MASSA LABS <info@massa.net>

use async_trait::async_trait;
use dormant_models::{NodeStatusReport, PeerDescriptor, PeerStatusReport};

use crate::PeerError;

/// Coordination rounds with the sibling node-managers
#[cfg_attr(any(test, feature = "test-exports"), mockall::automock)]
#[async_trait]
pub trait PeerCoordinator: Send + Sync {
    /// Ask every peer for its status. Fails if any peer does not answer or is shutting down.
    async fn validate_peers(&self) -> Result<Vec<PeerStatusReport>, PeerError>;

    /// Ask the peers managing the given privacy manager keys to get ready for a
    /// private transaction. `Ok(true)` only if every matched peer is ready.
    /// Keys not managed by any known peer are skipped.
    async fn validate_peer_private_tx_status(
        &self,
        participant_keys: Vec<String>,
    ) -> Result<bool, PeerError>;
}

/// Control RPC calls to one peer
#[cfg_attr(any(test, feature = "test-exports"), mockall::automock)]
#[async_trait]
pub trait PeerRpc: Send + Sync {
    /// status of the peer node
    async fn node_status(
        &self,
        peer: &PeerDescriptor,
        client_id: &str,
    ) -> Result<NodeStatusReport, PeerError>;

    /// have the peer wake its node up, returns its readiness
    async fn prepare_for_private_tx(
        &self,
        peer: &PeerDescriptor,
        client_id: &str,
    ) -> Result<bool, PeerError>;
}

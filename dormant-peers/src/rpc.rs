// Copyright (c) 2022 MASSA LABS <info@massa.net>

use async_trait::async_trait;
use dormant_api_exports::DormantRpcClient;
use dormant_models::{NodeStatusReport, PeerDescriptor};
use dormant_time::DormantTime;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};

use crate::{PeerError, PeerRpc};

/// Calls the control RPC of the peers over HTTP
pub struct JsonRpcPeerClient {
    request_timeout: DormantTime,
}

impl JsonRpcPeerClient {
    /// Default constructor
    pub fn new(request_timeout: DormantTime) -> Self {
        JsonRpcPeerClient { request_timeout }
    }

    fn client(&self, peer: &PeerDescriptor) -> Result<HttpClient, PeerError> {
        HttpClientBuilder::default()
            .request_timeout(self.request_timeout.to_duration())
            .build(&peer.rpc_url)
            .map_err(|err| PeerError::RpcError(peer.name.clone(), err.to_string()))
    }
}

#[async_trait]
impl PeerRpc for JsonRpcPeerClient {
    async fn node_status(
        &self,
        peer: &PeerDescriptor,
        client_id: &str,
    ) -> Result<NodeStatusReport, PeerError> {
        self.client(peer)?
            .node_status(client_id.to_string())
            .await
            .map_err(|err| PeerError::RpcError(peer.name.clone(), err.to_string()))
    }

    async fn prepare_for_private_tx(
        &self,
        peer: &PeerDescriptor,
        client_id: &str,
    ) -> Result<bool, PeerError> {
        self.client(peer)?
            .prepare_for_private_tx(client_id.to_string())
            .await
            .map(|reply| reply.status)
            .map_err(|err| PeerError::RpcError(peer.name.clone(), err.to_string()))
    }
}

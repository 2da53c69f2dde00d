// Copyright (c) 2022 MASSA LABS <info@massa.net>

use async_trait::async_trait;
use dormant_time::DormantTime;
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::ArrayParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{ClientRpc, ConsensusError};

/// JSON-RPC over HTTP to the blockchain client
pub struct JsonRpcClient {
    client: HttpClient,
}

impl JsonRpcClient {
    /// build a client for `url`
    pub fn new(url: &str, timeout: DormantTime) -> Result<Self, ConsensusError> {
        let client = HttpClientBuilder::default()
            .request_timeout(timeout.to_duration())
            .build(url)
            .map_err(|err| ConsensusError::ClientError(err.to_string()))?;
        Ok(JsonRpcClient { client })
    }
}

#[async_trait]
impl ClientRpc for JsonRpcClient {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, ConsensusError> {
        let mut rpc_params = ArrayParams::new();
        for param in params {
            rpc_params
                .insert(param)
                .map_err(|err| ConsensusError::RpcError(method.to_string(), err.to_string()))?;
        }
        self.client
            .request::<Value, _>(method, rpc_params)
            .await
            .map_err(|err| ConsensusError::RpcError(method.to_string(), err.to_string()))
    }
}

/// Call `method` without parameters and decode its result
pub(crate) async fn call_typed<T: DeserializeOwned>(
    rpc: &dyn ClientRpc,
    method: &str,
) -> Result<T, ConsensusError> {
    let raw = rpc.call(method, Vec::new()).await?;
    serde_json::from_value(raw)
        .map_err(|err| ConsensusError::InvalidResponse(method.to_string(), err.to_string()))
}

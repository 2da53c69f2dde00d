//! Copyright (c) 2022 MASSA LABS <info@massa.net>
//! Control methods served to the peers and to the operators
use async_trait::async_trait;
use dormant_api_exports::{
    config::APIConfig,
    error::ApiError,
    node::{IsNodeUpReply, NodeStatusReport, PrivateTxPrepReply},
    DormantRpcServer,
};
use dormant_control_exports::{NodeControlController, NodeControlError};
use jsonrpsee::core::RpcResult;
use std::net::SocketAddr;
use tracing::{debug, info, warn};

use crate::{serve, Control, RpcServer, StopHandle, API};

impl API<Control> {
    /// generate a new control API
    pub fn new(node_controller: Box<dyn NodeControlController>) -> Self {
        API(Control { node_controller })
    }
}

#[async_trait]
impl RpcServer for API<Control> {
    async fn serve(
        self,
        url: &SocketAddr,
        settings: &APIConfig,
    ) -> Result<StopHandle, ApiError> {
        serve(self.into_rpc(), url, settings).await
    }
}

fn check_client_id(client_id: &str) -> Result<(), ApiError> {
    if client_id.trim().is_empty() {
        return Err(ApiError::BadRequest("missing client id".into()));
    }
    Ok(())
}

#[async_trait]
impl DormantRpcServer for API<Control> {
    async fn node_status(&self, client_id: String) -> RpcResult<NodeStatusReport> {
        check_client_id(&client_id)?;
        let report = self.0.node_controller.node_status_report();
        debug!("node status requested by {}: {}", client_id, report);
        Ok(report)
    }

    async fn prepare_for_private_tx(&self, client_id: String) -> RpcResult<PrivateTxPrepReply> {
        check_client_id(&client_id)?;
        info!("{} asks this node to get ready for a private transaction", client_id);
        let controller = &self.0.node_controller;
        controller.reset_inactivity();
        match controller.prepare_node().await {
            Ok(()) => Ok(PrivateTxPrepReply { status: true }),
            Err(NodeControlError::Busy(state)) => {
                warn!("cannot prepare for {}, node is {}", client_id, state);
                Ok(PrivateTxPrepReply { status: false })
            }
            Err(err) => Err(ApiError::NodeControlError(err.to_string()).into()),
        }
    }

    async fn is_node_up(&self, client_id: String) -> RpcResult<IsNodeUpReply> {
        check_client_id(&client_id)?;
        Ok(IsNodeUpReply {
            status: self.0.node_controller.is_node_up().await,
        })
    }
}

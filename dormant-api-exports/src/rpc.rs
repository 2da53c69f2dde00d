// Copyright (c) 2022 MASSA LABS <info@massa.net>

use jsonrpsee::core::RpcResult;
use jsonrpsee::proc_macros::rpc;

use crate::node::{IsNodeUpReply, NodeStatusReport, PrivateTxPrepReply};

/// Control methods of a node-manager. `client_id` names the caller, for logs.
#[rpc(server, client, namespace = "node")]
pub trait DormantRpc {
    /// Lifecycle state and inactivity counters of the node.
    #[method(name = "nodeStatus")]
    async fn node_status(&self, client_id: String) -> RpcResult<NodeStatusReport>;

    /// Wake the node up if needed, then report whether it is ready for a private transaction.
    #[method(name = "prepareForPrivateTx")]
    async fn prepare_for_private_tx(&self, client_id: String) -> RpcResult<PrivateTxPrepReply>;

    /// Probe both managed processes.
    #[method(name = "isNodeUp")]
    async fn is_node_up(&self, client_id: String) -> RpcResult<IsNodeUpReply>;
}

// Copyright (c) 2022 MASSA LABS <info@massa.net>

use async_trait::async_trait;
use dormant_control_exports::{NodeControlController, NodeControlError};
use dormant_models::{NodeState, NodeStatusReport};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::commands::{CommandKind, NodeCommand};
use crate::node_control::NodeControl;

/// Handle on the node control worker, cheap to clone
#[derive(Clone)]
pub struct NodeControlControllerImpl {
    pub(crate) node: Arc<NodeControl>,
    pub(crate) command_tx: mpsc::Sender<NodeCommand>,
    pub(crate) reset_tx: mpsc::UnboundedSender<()>,
}

impl NodeControlControllerImpl {
    async fn request(&self, kind: CommandKind) -> Result<(), NodeControlError> {
        let state = self.node.state();
        if state.is_transient() {
            return Err(NodeControlError::Busy(state));
        }
        let action = self.node.try_begin_action()?;
        let (reply, reply_rx) = oneshot::channel();
        debug!("queueing {:?} request", kind);
        self.command_tx
            .send(NodeCommand {
                kind,
                action,
                reply,
            })
            .await
            .map_err(|_| NodeControlError::WorkerStopped)?;
        reply_rx
            .await
            .map_err(|_| NodeControlError::WorkerStopped)?
    }
}

#[async_trait]
impl NodeControlController for NodeControlControllerImpl {
    async fn request_stop_node(&self) -> Result<(), NodeControlError> {
        self.request(CommandKind::Stop).await
    }

    async fn request_start_node(&self) -> Result<(), NodeControlError> {
        self.request(CommandKind::Start).await
    }

    async fn prepare_node(&self) -> Result<(), NodeControlError> {
        self.node.prepare_node().await
    }

    fn is_node_busy(&self) -> Result<(), NodeControlError> {
        self.node.is_node_busy()
    }

    fn get_node_status(&self) -> NodeState {
        self.node.state()
    }

    async fn is_node_up(&self) -> bool {
        self.node.is_node_up().await
    }

    fn node_status_report(&self) -> NodeStatusReport {
        self.node.status_report()
    }

    fn reset_inactivity(&self) {
        // the monitor is gone once the worker is stopped, nothing to reset then
        let _ = self.reset_tx.send(());
    }

    async fn validate_private_tx_participants(
        &self,
        participant_keys: Vec<String>,
    ) -> Result<bool, NodeControlError> {
        self.node
            .peers
            .validate_peer_private_tx_status(participant_keys)
            .await
            .map_err(|err| NodeControlError::PrivateTxError(err.to_string()))
    }

    fn clone_box(&self) -> Box<dyn NodeControlController> {
        Box::new(self.clone())
    }
}

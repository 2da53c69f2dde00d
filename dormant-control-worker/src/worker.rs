// Copyright (c) 2022 MASSA LABS <info@massa.net>

use dormant_consensus::ConsensusValidator;
use dormant_control_exports::{
    NodeControlConfig, NodeControlController, NodeControlError, NodeControlManager,
};
use dormant_models::NodeState;
use dormant_peers::PeerCoordinator;
use dormant_process::ProcessController;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::commands::{CommandKind, NodeCommand};
use crate::controller::NodeControlControllerImpl;
use crate::manager::NodeControlManagerImpl;
use crate::monitor::InactivityMonitor;
use crate::node_control::NodeControl;

/// Executes queued start and stop requests one at a time
async fn command_loop(
    node: Arc<NodeControl>,
    mut command_rx: mpsc::Receiver<NodeCommand>,
    mut stop_rx: watch::Receiver<bool>,
) {
    loop {
        let command = tokio::select! {
            _ = stop_rx.changed() => break,
            command = command_rx.recv() => match command {
                Some(command) => command,
                None => break,
            },
        };
        let result = match command.kind {
            CommandKind::Stop => node.stop_node(&command.action).await,
            CommandKind::Start => node.start_node(&command.action).await,
        };
        drop(command.action);
        if command.reply.send(result).is_err() {
            debug!("{:?} requester went away before the outcome", command.kind);
        }
    }
    debug!("node control request queue stopped");
}

/// Launch the node control worker.
///
/// Both managed processes are probed first: the node starts `Up` if both
/// answer, `Down` otherwise.
///
/// # Arguments
/// * `cfg`: node control settings
/// * `client`: blockchain client process
/// * `privacy_manager`: privacy manager process
/// * `consensus`: validator gating every stop
/// * `peers`: coordinator with the sibling node-managers
///
/// # Returns
/// A manager to stop the worker, and a controller to drive it
pub async fn start_node_control_worker(
    cfg: NodeControlConfig,
    client: Box<dyn ProcessController>,
    privacy_manager: Box<dyn ProcessController>,
    consensus: Box<dyn ConsensusValidator>,
    peers: Box<dyn PeerCoordinator>,
) -> Result<(Box<dyn NodeControlManager>, Box<dyn NodeControlController>), NodeControlError> {
    cfg.check()?;
    let client_up = client.is_up().await;
    let privacy_manager_up = privacy_manager.is_up().await;
    let initial_state = if client_up && privacy_manager_up {
        NodeState::Up
    } else {
        NodeState::Down
    };
    info!(
        "node control of {} starting, node is {} ({} consensus)",
        cfg.name,
        initial_state,
        consensus.kind()
    );

    let node = Arc::new(NodeControl::new(
        cfg,
        initial_state,
        client,
        privacy_manager,
        consensus,
        peers,
    ));
    let (command_tx, command_rx) = mpsc::channel(1);
    let (reset_tx, reset_rx) = mpsc::unbounded_channel();
    let (stop_tx, stop_rx) = watch::channel(false);

    let controller = NodeControlControllerImpl {
        node: node.clone(),
        command_tx,
        reset_tx,
    };
    let monitor = InactivityMonitor::new(controller.clone(), reset_rx, stop_rx.clone());

    let handles = vec![
        tokio::spawn(command_loop(node, command_rx, stop_rx)),
        tokio::spawn(monitor.run()),
    ];
    let manager = NodeControlManagerImpl { stop_tx, handles };
    Ok((Box::new(manager), Box::new(controller)))
}

// Copyright (c) 2022 MASSA LABS <info@massa.net>

use async_trait::async_trait;
use dormant_control_exports::NodeControlManager;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Node control manager
/// Allows stopping the node control worker tasks
pub struct NodeControlManagerImpl {
    pub(crate) stop_tx: watch::Sender<bool>,
    pub(crate) handles: Vec<JoinHandle<()>>,
}

#[async_trait]
impl NodeControlManager for NodeControlManagerImpl {
    async fn stop(&mut self) {
        info!("stopping node control worker...");
        let _ = self.stop_tx.send(true);
        for handle in self.handles.drain(..) {
            if let Err(err) = handle.await {
                warn!("node control task failed: {}", err);
            }
        }
        info!("node control worker stopped");
    }
}

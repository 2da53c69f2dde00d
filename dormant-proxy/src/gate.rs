// Copyright (c) 2022 MASSA LABS <info@massa.net>

use dormant_control_exports::NodeControlController;
use tracing::debug;

use crate::private_tx::private_for_keys;
use crate::ProxyError;

/// Checks run before anything is relayed upstream
pub(crate) struct ActivityGate {
    controller: Box<dyn NodeControlController>,
    ignore_paths: Vec<String>,
}

impl ActivityGate {
    pub fn new(controller: Box<dyn NodeControlController>, ignore_paths: Vec<String>) -> Self {
        ActivityGate {
            controller,
            ignore_paths,
        }
    }

    fn is_ignored(&self, path: &str) -> bool {
        self.ignore_paths.iter().any(|ignored| ignored == path)
    }

    /// Count the payload as activity, make sure the node is up and, for a
    /// private transaction, that the nodes of its participants are up too.
    /// Allowlisted paths go straight through.
    pub async fn admit(&self, path: &str, payload: &[u8]) -> Result<(), ProxyError> {
        if self.is_ignored(path) {
            return Ok(());
        }
        self.controller.reset_inactivity();
        self.controller
            .is_node_busy()
            .map_err(|err| ProxyError::NodeBusy(err.to_string()))?;
        self.controller
            .prepare_node()
            .await
            .map_err(|err| ProxyError::WakeUpFailed(err.to_string()))?;

        let participants = private_for_keys(payload);
        if participants.is_empty() {
            return Ok(());
        }
        debug!("private transaction for {} participants", participants.len());
        match self
            .controller
            .validate_private_tx_participants(participants)
            .await
        {
            Ok(true) => Ok(()),
            Ok(false) => Err(ProxyError::PrivateTxNotReady),
            Err(err) => Err(ProxyError::PrivateTxError(err.to_string())),
        }
    }
}

// Copyright (c) 2022 MASSA LABS <info@massa.net>

use async_trait::async_trait;
use serde_json::Value;

use crate::{ConsensusError, ConsensusKind};

/// Answers "can this node stop right now?"
#[cfg_attr(any(test, feature = "test-exports"), mockall::automock)]
#[async_trait]
pub trait ConsensusValidator: Send + Sync {
    /// `Ok(is_consensus_participant)` when the node can be stopped,
    /// `Err` is a veto carrying the reason.
    async fn validate_shutdown(&self) -> Result<bool, ConsensusError>;

    /// algorithm checked by this validator
    fn kind(&self) -> ConsensusKind;
}

/// Raw JSON-RPC access to the blockchain client
#[cfg_attr(any(test, feature = "test-exports"), mockall::automock)]
#[async_trait]
pub trait ClientRpc: Send + Sync {
    /// call `method` with positional `params` and return the raw result
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, ConsensusError>;
}

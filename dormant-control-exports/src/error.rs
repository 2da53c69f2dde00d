// Copyright (c) 2022 MASSA LABS <info@massa.net>

use displaydoc::Display;
use dormant_models::NodeState;
use thiserror::Error;

/// Node control errors
#[non_exhaustive]
#[derive(Display, Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeControlError {
    /// node is busy, current state: {0}
    Busy(NodeState),
    /// peers did not allow a shutdown after {attempts} attempts: {cause}
    PeerValidationFailed {
        /// validation rounds run
        attempts: u32,
        /// error of the last round
        cause: String,
    },
    /// shutdown vetoed by consensus: {0}
    ConsensusVeto(String),
    /// managed process failure, node left {state}: {cause}
    ProcessFailure {
        /// state the node is stuck in
        state: NodeState,
        /// failed processes and their errors
        cause: String,
    },
    /// private transaction coordination failed: {0}
    PrivateTxError(String),
    /// node control worker is stopped
    WorkerStopped,
    /// invalid configuration: {0}
    InvalidConfig(String),
}

// Copyright (c) 2022 MASSA LABS <info@massa.net>

use dormant_control_exports::NodeControlError;
use tokio::sync::{oneshot, OwnedMutexGuard};

/// Start or stop request posted to the queue consumer.
///
/// The guard of the action lock travels with the request so that no other
/// request can be accepted until this one has been executed.
pub(crate) struct NodeCommand {
    pub kind: CommandKind,
    pub action: OwnedMutexGuard<()>,
    pub reply: oneshot::Sender<Result<(), NodeControlError>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommandKind {
    Stop,
    Start,
}

// Copyright (c) 2022 MASSA LABS <info@massa.net>

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of the managed node (blockchain client + privacy manager).
///
/// `Up` and `Down` are stable. The four other states are held only while a
/// start or stop sequence runs, or after one of them failed half-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeState {
    /// both processes are running
    Up,
    /// both processes are stopped
    Down,
    /// stop requested, consensus check running
    ShutdownInitiated,
    /// processes are being stopped
    ShutdownInprogress,
    /// start requested
    StartupInitiated,
    /// processes are being started
    StartupInprogress,
}

impl NodeState {
    /// true for every state other than `Up` and `Down`
    pub fn is_transient(&self) -> bool {
        !matches!(self, NodeState::Up | NodeState::Down)
    }

    /// true while the node is going down
    pub fn is_shutting_down(&self) -> bool {
        matches!(
            self,
            NodeState::ShutdownInitiated | NodeState::ShutdownInprogress
        )
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeState::Up => "Up",
            NodeState::Down => "Down",
            NodeState::ShutdownInitiated => "ShutdownInitiated",
            NodeState::ShutdownInprogress => "ShutdownInprogress",
            NodeState::StartupInitiated => "StartupInitiated",
            NodeState::StartupInprogress => "StartupInprogress",
        };
        write!(f, "{}", s)
    }
}

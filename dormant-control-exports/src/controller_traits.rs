// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! This module exports generic traits representing interfaces for interacting
//! with the node control worker.

use async_trait::async_trait;
use dormant_models::{NodeState, NodeStatusReport};

use crate::NodeControlError;

/// Interface that communicates with the node control worker
#[cfg_attr(any(test, feature = "test-exports"), mockall::automock)]
#[async_trait]
pub trait NodeControlController: Send + Sync {
    /// Queue a stop of the node and wait for its outcome.
    /// Rejected with `Busy` if a start or a stop is already in flight.
    async fn request_stop_node(&self) -> Result<(), NodeControlError>;

    /// Queue a start of the node and wait for its outcome.
    /// Rejected with `Busy` if a start or a stop is already in flight.
    async fn request_start_node(&self) -> Result<(), NodeControlError>;

    /// Make sure the node is up, starting it if the probe says otherwise
    async fn prepare_node(&self) -> Result<(), NodeControlError>;

    /// `Busy` while the node is in a transient state
    fn is_node_busy(&self) -> Result<(), NodeControlError>;

    /// current state
    fn get_node_status(&self) -> NodeState;

    /// probe both managed processes
    async fn is_node_up(&self) -> bool;

    /// state and inactivity counters
    fn node_status_report(&self) -> NodeStatusReport;

    /// signal activity to the inactivity monitor
    fn reset_inactivity(&self);

    /// Ask the peers managing the given participants to get ready for a private transaction
    async fn validate_private_tx_participants(
        &self,
        participant_keys: Vec<String>,
    ) -> Result<bool, NodeControlError>;

    /// Returns a boxed clone of self.
    /// Useful to allow cloning `Box<dyn NodeControlController>`.
    fn clone_box(&self) -> Box<dyn NodeControlController>;
}

/// Allow cloning `Box<dyn NodeControlController>`
/// Uses `NodeControlController::clone_box` internally
impl Clone for Box<dyn NodeControlController> {
    fn clone(&self) -> Box<dyn NodeControlController> {
        self.clone_box()
    }
}

/// Node control manager used to stop the worker tasks
#[async_trait]
pub trait NodeControlManager: Send {
    /// Stop the inactivity monitor and the request queue, waiting for the
    /// sequence in flight, if any, to complete
    async fn stop(&mut self);
}

// Copyright (c) 2022 MASSA LABS <info@massa.net>
//! Node control worker.
//!
//! Owns the lifecycle state machine of the managed node (blockchain client
//! plus privacy manager). Stops are gated by the peers and by the consensus
//! validator, starts and stops never interleave, and an inactivity monitor
//! puts the node to sleep when no traffic reaches it.
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

mod commands;
mod controller;
mod manager;
mod monitor;
mod node_control;
mod worker;

pub use controller::NodeControlControllerImpl;
pub use manager::NodeControlManagerImpl;
pub use worker::start_node_control_worker;

#[cfg(test)]
mod tests;

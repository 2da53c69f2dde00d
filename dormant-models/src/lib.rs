// Copyright (c) 2022 MASSA LABS <info@massa.net>
//! All the structures that are used everywhere
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

/// node lifecycle state
pub mod node_state;
/// peer roster entries and status reports
pub mod peer;

pub use node_state::NodeState;
pub use peer::{NodeStatusReport, PeerDescriptor, PeerStatusReport};

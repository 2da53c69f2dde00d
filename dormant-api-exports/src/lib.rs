// Copyright (c) 2022 MASSA LABS <info@massa.net>
//! Contract of the control RPC exposed by every node-manager: structures,
//! errors and the method list, shared by the server and by the peers that
//! poll it.
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

/// API configuration
pub mod config;
/// API errors
pub mod error;
/// replies of the control methods
pub mod node;
/// method list
pub mod rpc;

pub use rpc::{DormantRpcClient, DormantRpcServer};

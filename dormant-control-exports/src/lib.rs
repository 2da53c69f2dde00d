// Copyright (c) 2022 MASSA LABS <info@massa.net>
//! Definition and exports of the node control interfaces, configuration and errors.
//!
//! The node control worker owns the lifecycle state machine of the managed node
//! and the inactivity monitor that puts it to sleep.
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

mod config;
mod controller_traits;
mod error;

pub use config::NodeControlConfig;
pub use controller_traits::{NodeControlController, NodeControlManager};
pub use error::NodeControlError;

#[cfg(any(test, feature = "test-exports"))]
pub use controller_traits::MockNodeControlController;

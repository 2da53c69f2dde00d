// Copyright (c) 2022 MASSA LABS <info@massa.net>
//! Control of one managed process (blockchain client or privacy manager):
//! start, stop and up-check behind a single contract, whatever the driver
//! (plain OS command or docker container).
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

mod config;
mod controller_impl;
mod controller_traits;
mod driver;
mod error;
mod upcheck;

pub use config::{ControlType, ProcessConfig, UpcheckConfig, UpcheckReturnType};
pub use controller_impl::ProcessControllerImpl;
pub use controller_traits::ProcessController;
pub use driver::ProcessDriver;
pub use error::ProcessError;
pub use upcheck::Upchecker;

#[cfg(any(test, feature = "test-exports"))]
pub use controller_traits::MockProcessController;

#[cfg(test)]
mod tests;

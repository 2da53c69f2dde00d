// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! This module exports the generic trait representing the interface for
//! controlling a managed process.

use async_trait::async_trait;

use crate::ProcessError;

/// Interface to start, stop and probe one managed process.
///
/// `start` and `stop` are no-ops when the cached status already matches the
/// target. Otherwise they issue the driver command and poll the up-check until
/// the process reaches the target state, or fail once the retries are exhausted.
#[cfg_attr(any(test, feature = "test-exports"), mockall::automock)]
#[async_trait]
pub trait ProcessController: Send + Sync {
    /// Start the process and wait until it is up
    async fn start(&self) -> Result<(), ProcessError>;

    /// Stop the process and wait until it is down
    async fn stop(&self) -> Result<(), ProcessError>;

    /// Probe the process now, refreshing the cached status
    async fn is_up(&self) -> bool;

    /// Cached status, as of the last probe or action
    fn status(&self) -> bool;

    /// Name of the process, for logs
    fn name(&self) -> String;
}

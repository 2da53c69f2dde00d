// Copyright (c) 2022 MASSA LABS <info@massa.net>

use displaydoc::Display;
use thiserror::Error;

/// Errors of the process component
#[non_exhaustive]
#[derive(Display, Error, Debug)]
pub enum ProcessError {
    /// failed to start {0}
    StartFailed(String),
    /// failed to stop {0}
    StopFailed(String),
    /// command for {0} failed: {1}
    CommandError(String, String),
    /// io error: {0}
    IoError(#[from] std::io::Error),
    /// upcheck error: {0}
    UpcheckError(String),
    /// invalid process configuration: {0}
    InvalidConfig(String),
}

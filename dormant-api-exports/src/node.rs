// Copyright (c) 2022 MASSA LABS <info@massa.net>

use serde::{Deserialize, Serialize};

pub use dormant_models::NodeStatusReport;

/// Reply of `prepareForPrivateTx`: is the node up and ready to take part in a private transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PrivateTxPrepReply {
    /// ready
    pub status: bool,
}

/// Reply of `isNodeUp`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct IsNodeUpReply {
    /// both managed processes answer their up-check
    pub status: bool,
}

// Copyright (c) 2022 MASSA LABS <info@massa.net>

use dormant_time::DormantTime;
use serde::Deserialize;

use crate::NodeControlError;

/// Node control settings
#[derive(Debug, Deserialize, Clone)]
pub struct NodeControlConfig {
    /// name of this node-manager
    pub name: String,
    /// inactivity after which the node is stopped
    pub inactivity_time: DormantTime,
    /// period after which a stopped node is woken up to catch up with the chain, 0 disables
    #[serde(default)]
    pub resync_time: DormantTime,
    /// period of the inactivity monitor
    pub tick_interval: DormantTime,
    /// number of peer validation rounds before a stop is abandoned
    pub peer_validation_retries: u32,
    /// lower bound of the random wait between two peer validation rounds
    pub peer_retry_wait_min: DormantTime,
    /// upper bound of the random wait between two peer validation rounds
    pub peer_retry_wait_max: DormantTime,
}

impl NodeControlConfig {
    /// Basic sanity checks
    pub fn check(&self) -> Result<(), NodeControlError> {
        if self.name.is_empty() {
            return Err(NodeControlError::InvalidConfig("empty node name".into()));
        }
        if self.inactivity_time.is_zero() {
            return Err(NodeControlError::InvalidConfig(
                "inactivity_time must be positive".into(),
            ));
        }
        if self.tick_interval.is_zero() {
            return Err(NodeControlError::InvalidConfig(
                "tick_interval must be positive".into(),
            ));
        }
        if self.peer_validation_retries == 0 {
            return Err(NodeControlError::InvalidConfig(
                "peer_validation_retries must be positive".into(),
            ));
        }
        if self.peer_retry_wait_min > self.peer_retry_wait_max {
            return Err(NodeControlError::InvalidConfig(
                "peer_retry_wait_min is above peer_retry_wait_max".into(),
            ));
        }
        Ok(())
    }
}

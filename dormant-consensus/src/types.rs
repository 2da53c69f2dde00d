// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Shapes of the blockchain client responses. Only the fields used by the
//! checks are decoded.

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// One member of `raft_cluster`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaftClusterMember {
    /// raft id
    #[serde(default)]
    pub raft_id: u64,
    /// minter / verifier / learner
    #[serde(default)]
    pub role: String,
    /// is the member currently reachable
    pub node_active: bool,
}

/// Result of `istanbul_status`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IstanbulStatus {
    /// number of blocks in the window
    pub num_blocks: u64,
    /// blocks sealed per validator address in the window
    pub sealer_activity: HashMap<String, u64>,
}

/// Result of `clique_status`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliqueStatus {
    /// number of blocks in the window
    pub num_blocks: u64,
    /// blocks sealed per signer address in the window
    pub sealer_activity: HashMap<String, u64>,
}

/// One entry of besu `clique_getSignerMetrics`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignerMetric {
    /// signer address
    pub address: String,
    /// blocks proposed in the window
    #[serde(deserialize_with = "deserialize_quantity")]
    pub proposed_block_count: u64,
    /// number of the last block proposed by the signer
    #[serde(deserialize_with = "deserialize_quantity")]
    pub last_proposed_block_number: u64,
}

/// Parse a JSON-RPC quantity: `0x`-prefixed hex string, decimal string or number
pub(crate) fn parse_quantity(raw: &str) -> Option<u64> {
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}

pub(crate) fn deserialize_quantity<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Quantity {
        Number(u64),
        Text(String),
    }
    match Quantity::deserialize(deserializer)? {
        Quantity::Number(value) => Ok(value),
        Quantity::Text(text) => parse_quantity(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid quantity {}", text))),
    }
}

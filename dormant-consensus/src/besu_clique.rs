// Copyright (c) 2022 MASSA LABS <info@massa.net>

use tracing::debug;

use crate::clique::majority_check;
use crate::rpc::call_typed;
use crate::types::parse_quantity;
use crate::{ClientRpc, ConsensusError, SignerMetric};

pub(crate) async fn validate_shutdown(rpc: &dyn ClientRpc) -> Result<bool, ConsensusError> {
    let coinbase: String = call_typed(rpc, "eth_coinbase").await?;
    let block_number: String = call_typed(rpc, "eth_blockNumber").await?;
    let current_block = parse_quantity(&block_number).ok_or_else(|| {
        ConsensusError::InvalidResponse("eth_blockNumber".into(), block_number.clone())
    })?;
    let metrics: Vec<SignerMetric> = call_typed(rpc, "clique_getSignerMetrics").await?;
    check_signer_metrics(&coinbase, current_block, &metrics)
}

/// A signer other than this node is down when it has not proposed a block
/// during the last `total` blocks. Returns `Ok(false)` when `coinbase` is not a signer.
pub(crate) fn check_signer_metrics(
    coinbase: &str,
    current_block: u64,
    metrics: &[SignerMetric],
) -> Result<bool, ConsensusError> {
    let is_signer = metrics
        .iter()
        .any(|metric| metric.address.eq_ignore_ascii_case(coinbase));
    if !is_signer {
        return Ok(false);
    }
    if current_block == 0 {
        return Err(ConsensusError::MintingNotStarted);
    }
    let total = metrics.len();
    let oldest_live_block = current_block.saturating_sub(total as u64);
    let down = metrics
        .iter()
        .filter(|metric| !metric.address.eq_ignore_ascii_case(coinbase))
        .filter(|metric| metric.last_proposed_block_number < oldest_live_block)
        .count();
    debug!(
        "besu clique: {} signers potentially down out of {} at block {}",
        down, total, current_block
    );
    majority_check(down, total)?;
    Ok(true)
}

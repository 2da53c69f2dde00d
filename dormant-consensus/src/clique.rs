// Copyright (c) 2022 MASSA LABS <info@massa.net>

use tracing::debug;

use crate::rpc::call_typed;
use crate::{ClientRpc, CliqueStatus, ConsensusError};

/// Deficit from the fair share at which a signer is considered potentially down
const SIGNER_DEFICIT_THRESHOLD: u64 = 2;

pub(crate) async fn validate_shutdown(rpc: &dyn ClientRpc) -> Result<bool, ConsensusError> {
    let coinbase: String = call_typed(rpc, "eth_coinbase").await?;
    let status: CliqueStatus = call_typed(rpc, "clique_status").await?;
    check_signer_activity(&coinbase, &status)
}

/// Returns `Ok(false)` when `coinbase` is not a signer.
pub(crate) fn check_signer_activity(
    coinbase: &str,
    status: &CliqueStatus,
) -> Result<bool, ConsensusError> {
    let is_signer = status
        .sealer_activity
        .keys()
        .any(|address| address.eq_ignore_ascii_case(coinbase));
    if !is_signer {
        return Ok(false);
    }
    if status.num_blocks == 0 {
        return Err(ConsensusError::MintingNotStarted);
    }
    let total = status.sealer_activity.len();
    let max_per_signer = status.num_blocks / total as u64;
    let down = status
        .sealer_activity
        .iter()
        .filter(|(address, _)| !address.eq_ignore_ascii_case(coinbase))
        .filter(|(_, count)| max_per_signer.saturating_sub(**count) >= SIGNER_DEFICIT_THRESHOLD)
        .count();
    debug!(
        "clique: {} signers potentially down out of {} (fair share {})",
        down, total, max_per_signer
    );
    majority_check(down, total)?;
    Ok(true)
}

/// A clique network needs a majority of signers alive
pub(crate) fn majority_check(down: usize, total: usize) -> Result<(), ConsensusError> {
    if down >= total.saturating_sub(1) / 2 {
        Err(ConsensusError::CliqueMajority { down, total })
    } else {
        Ok(())
    }
}

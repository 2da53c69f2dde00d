// Copyright (c) 2022 MASSA LABS <info@massa.net>

use tracing::debug;

use crate::rpc::call_typed;
use crate::{ClientRpc, ConsensusError, IstanbulStatus};

pub(crate) async fn validate_shutdown(rpc: &dyn ClientRpc) -> Result<bool, ConsensusError> {
    let is_validator: bool = call_typed(rpc, "istanbul_isValidator").await?;
    if !is_validator {
        return Ok(false);
    }
    let self_address: String = call_typed(rpc, "istanbul_nodeAddress").await?;
    let status: IstanbulStatus = call_typed(rpc, "istanbul_status").await?;
    check_sealer_activity(&self_address, &status)?;
    Ok(true)
}

/// Byzantine bound: with `n` validators, `floor((n-1)/3)` may be faulty.
/// A validator (other than this node) is potentially down when it sealed more
/// than one block less than the most active one.
pub(crate) fn check_sealer_activity(
    self_address: &str,
    status: &IstanbulStatus,
) -> Result<(), ConsensusError> {
    let sealed: u64 = status.sealer_activity.values().sum();
    if sealed == 0 {
        return Err(ConsensusError::MintingNotStarted);
    }
    let max_sealed = status.sealer_activity.values().copied().max().unwrap_or(0);
    let down = status
        .sealer_activity
        .iter()
        .filter(|(address, _)| !address.eq_ignore_ascii_case(self_address))
        .filter(|(_, count)| max_sealed - **count > 1)
        .count();
    let total = status.sealer_activity.len();
    debug!(
        "istanbul: {} validators potentially down out of {} (max sealed {})",
        down, total, max_sealed
    );
    if down >= total.saturating_sub(1) / 3 {
        Err(ConsensusError::IstanbulQuorum { down, total })
    } else {
        Ok(())
    }
}

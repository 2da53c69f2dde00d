// Copyright (c) 2022 MASSA LABS <info@massa.net>

use tracing::debug;

use crate::rpc::call_typed;
use crate::{ClientRpc, ConsensusError, RaftClusterMember};

const ROLE_MINTER: &str = "minter";
const ROLE_LEARNER: &str = "learner";

pub(crate) async fn validate_shutdown(rpc: &dyn ClientRpc) -> Result<bool, ConsensusError> {
    let role: String = call_typed(rpc, "raft_role").await?;
    match role.as_str() {
        ROLE_MINTER => Err(ConsensusError::RaftMinter),
        ROLE_LEARNER => Ok(false),
        _ => {
            let cluster: Vec<RaftClusterMember> = call_typed(rpc, "raft_cluster").await?;
            check_cluster(&cluster)?;
            Ok(true)
        }
    }
}

/// A voting peer can leave only if strictly more than a majority plus one is active
pub(crate) fn check_cluster(cluster: &[RaftClusterMember]) -> Result<(), ConsensusError> {
    let total = cluster.len();
    let active = cluster.iter().filter(|member| member.node_active).count();
    debug!("raft: {} active nodes out of {}", active, total);
    if active > (total / 2) + 1 {
        Ok(())
    } else {
        Err(ConsensusError::RaftQuorum { active, total })
    }
}

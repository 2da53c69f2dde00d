// Copyright (c) 2022 MASSA LABS <info@massa.net>

use async_trait::async_trait;

use crate::{
    besu_clique, clique, istanbul, raft, ClientRpc, ConsensusConfig, ConsensusError,
    ConsensusKind, ConsensusValidator, JsonRpcClient,
};

/// Validator of the algorithm selected at startup
pub struct ConsensusValidatorImpl {
    kind: ConsensusKind,
    rpc: Box<dyn ClientRpc>,
}

impl ConsensusValidatorImpl {
    /// Validator talking JSON-RPC to the configured blockchain client
    pub fn from_config(cfg: &ConsensusConfig) -> Result<Self, ConsensusError> {
        let rpc = JsonRpcClient::new(&cfg.rpc_url, cfg.rpc_timeout)?;
        Ok(Self::new(cfg.kind, Box::new(rpc)))
    }

    /// Validator over any RPC access
    pub fn new(kind: ConsensusKind, rpc: Box<dyn ClientRpc>) -> Self {
        ConsensusValidatorImpl { kind, rpc }
    }
}

#[async_trait]
impl ConsensusValidator for ConsensusValidatorImpl {
    async fn validate_shutdown(&self) -> Result<bool, ConsensusError> {
        let rpc = self.rpc.as_ref();
        match self.kind {
            ConsensusKind::Raft => raft::validate_shutdown(rpc).await,
            ConsensusKind::Istanbul => istanbul::validate_shutdown(rpc).await,
            ConsensusKind::Clique => clique::validate_shutdown(rpc).await,
            ConsensusKind::BesuClique => besu_clique::validate_shutdown(rpc).await,
        }
    }

    fn kind(&self) -> ConsensusKind {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockClientRpc;
    use serde_json::{json, Value};

    /// mock answering each method with a fixed value, exactly once
    fn rpc_answering(answers: Vec<(&'static str, Value)>) -> Box<dyn ClientRpc> {
        let mut rpc = MockClientRpc::new();
        for (method, answer) in answers {
            rpc.expect_call()
                .withf(move |m, _| m.to_string() == method)
                .times(1)
                .returning(move |_, _| Ok(answer.clone()));
        }
        Box::new(rpc)
    }

    fn validator(kind: ConsensusKind, answers: Vec<(&'static str, Value)>) -> ConsensusValidatorImpl {
        ConsensusValidatorImpl::new(kind, rpc_answering(answers))
    }

    fn raft_cluster(active: &[bool]) -> Value {
        Value::Array(
            active
                .iter()
                .enumerate()
                .map(|(i, node_active)| {
                    json!({"raftId": i + 1, "role": "verifier", "nodeActive": node_active, "hostname": "127.0.0.1"})
                })
                .collect(),
        )
    }

    #[tokio::test]
    async fn raft_minter_always_vetoes() {
        let v = validator(ConsensusKind::Raft, vec![("raft_role", json!("minter"))]);
        assert!(matches!(
            v.validate_shutdown().await,
            Err(ConsensusError::RaftMinter)
        ));
    }

    #[tokio::test]
    async fn raft_learner_is_not_a_participant() {
        let v = validator(ConsensusKind::Raft, vec![("raft_role", json!("learner"))]);
        assert!(!v.validate_shutdown().await.unwrap());
    }

    #[tokio::test]
    async fn raft_verifier_with_two_of_three_active_vetoes() {
        let v = validator(
            ConsensusKind::Raft,
            vec![
                ("raft_role", json!("verifier")),
                ("raft_cluster", raft_cluster(&[true, true, false])),
            ],
        );
        match v.validate_shutdown().await {
            Err(ConsensusError::RaftQuorum { active, total }) => {
                assert_eq!((active, total), (2, 3))
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn raft_verifier_with_full_cluster_may_stop() {
        let v = validator(
            ConsensusKind::Raft,
            vec![
                ("raft_role", json!("verifier")),
                ("raft_cluster", raft_cluster(&[true, true, true])),
            ],
        );
        assert!(v.validate_shutdown().await.unwrap());
    }

    #[test]
    fn raft_threshold() {
        let members = |active: usize, total: usize| -> Vec<crate::RaftClusterMember> {
            (0..total)
                .map(|i| crate::RaftClusterMember {
                    raft_id: i as u64,
                    role: "verifier".into(),
                    node_active: i < active,
                })
                .collect()
        };
        // veto iff active <= total/2 + 1
        assert!(raft::check_cluster(&members(4, 5)).is_ok());
        assert!(raft::check_cluster(&members(3, 5)).is_err());
        assert!(raft::check_cluster(&members(5, 7)).is_ok());
        assert!(raft::check_cluster(&members(4, 7)).is_err());
    }

    fn istanbul_answers(activity: Value, num_blocks: u64) -> Vec<(&'static str, Value)> {
        vec![
            ("istanbul_isValidator", json!(true)),
            ("istanbul_nodeAddress", json!("0xAAAA")),
            (
                "istanbul_status",
                json!({"numBlocks": num_blocks, "sealerActivity": activity}),
            ),
        ]
    }

    #[tokio::test]
    async fn istanbul_non_validator_is_safe() {
        let v = validator(
            ConsensusKind::Istanbul,
            vec![("istanbul_isValidator", json!(false))],
        );
        assert!(!v.validate_shutdown().await.unwrap());
    }

    #[tokio::test]
    async fn istanbul_balanced_activity_is_safe() {
        let v = validator(
            ConsensusKind::Istanbul,
            istanbul_answers(
                json!({"0xaaaa": 10, "0xbbbb": 10, "0xcccc": 10, "0xdddd": 10}),
                40,
            ),
        );
        assert!(v.validate_shutdown().await.unwrap());
    }

    #[tokio::test]
    async fn istanbul_lagging_self_is_safe() {
        let v = validator(
            ConsensusKind::Istanbul,
            istanbul_answers(
                json!({"0xaaaa": 0, "0xbbbb": 10, "0xcccc": 10, "0xdddd": 10}),
                30,
            ),
        );
        assert!(v.validate_shutdown().await.unwrap());
    }

    #[tokio::test]
    async fn istanbul_lagging_peer_vetoes() {
        let v = validator(
            ConsensusKind::Istanbul,
            istanbul_answers(
                json!({"0xaaaa": 10, "0xbbbb": 0, "0xcccc": 10, "0xdddd": 10}),
                30,
            ),
        );
        assert!(matches!(
            v.validate_shutdown().await,
            Err(ConsensusError::IstanbulQuorum { down: 1, total: 4 })
        ));
    }

    #[tokio::test]
    async fn istanbul_without_minting_vetoes() {
        let v = validator(
            ConsensusKind::Istanbul,
            istanbul_answers(json!({"0xaaaa": 0, "0xbbbb": 0}), 0),
        );
        let err = v.validate_shutdown().await.unwrap_err();
        assert!(matches!(err, ConsensusError::MintingNotStarted));
        assert!(err.to_string().contains("minting not started"));
    }

    #[tokio::test]
    async fn istanbul_seven_validators_tolerate_one_laggard() {
        let v = validator(
            ConsensusKind::Istanbul,
            istanbul_answers(
                json!({"0xaaaa": 5, "0x1": 5, "0x2": 5, "0x3": 5, "0x4": 5, "0x5": 5, "0x6": 1}),
                31,
            ),
        );
        // floor(6/3) = 2, one laggard other than self
        assert!(v.validate_shutdown().await.unwrap());
    }

    fn clique_answers(activity: Value, num_blocks: u64) -> Vec<(&'static str, Value)> {
        vec![
            ("eth_coinbase", json!("0xaaaa")),
            (
                "clique_status",
                json!({"inturnPercent": 100, "numBlocks": num_blocks, "sealerActivity": activity}),
            ),
        ]
    }

    #[tokio::test]
    async fn clique_non_signer_is_safe() {
        let v = validator(
            ConsensusKind::Clique,
            clique_answers(json!({"0xbbbb": 32, "0xcccc": 32}), 64),
        );
        assert!(!v.validate_shutdown().await.unwrap());
    }

    #[tokio::test]
    async fn clique_healthy_signers_allow_shutdown() {
        let v = validator(
            ConsensusKind::Clique,
            clique_answers(
                json!({"0xAAAA": 16, "0xbbbb": 16, "0xcccc": 16, "0xdddd": 16}),
                64,
            ),
        );
        assert!(v.validate_shutdown().await.unwrap());
    }

    #[tokio::test]
    async fn clique_lagging_signer_vetoes() {
        // fair share 16, 0xbbbb is 2 blocks short
        let v = validator(
            ConsensusKind::Clique,
            clique_answers(
                json!({"0xaaaa": 16, "0xbbbb": 14, "0xcccc": 17, "0xdddd": 17}),
                64,
            ),
        );
        assert!(matches!(
            v.validate_shutdown().await,
            Err(ConsensusError::CliqueMajority { down: 1, total: 4 })
        ));
    }

    #[tokio::test]
    async fn clique_one_block_deficit_is_tolerated() {
        let v = validator(
            ConsensusKind::Clique,
            clique_answers(
                json!({"0xaaaa": 16, "0xbbbb": 15, "0xcccc": 17, "0xdddd": 16}),
                64,
            ),
        );
        assert!(v.validate_shutdown().await.unwrap());
    }

    fn besu_answers(block: &str, metrics: Value) -> Vec<(&'static str, Value)> {
        vec![
            ("eth_coinbase", json!("0xaaaa")),
            ("eth_blockNumber", json!(block)),
            ("clique_getSignerMetrics", metrics),
        ]
    }

    fn metric(address: &str, last: u64) -> Value {
        json!({
            "address": address,
            "proposedBlockCount": "0x10",
            "lastProposedBlockNumber": format!("0x{:x}", last)
        })
    }

    #[tokio::test]
    async fn besu_clique_active_signers_allow_shutdown() {
        let v = validator(
            ConsensusKind::BesuClique,
            besu_answers(
                "0x64",
                json!([metric("0xaaaa", 97), metric("0xbbbb", 98), metric("0xcccc", 99), metric("0xdddd", 100)]),
            ),
        );
        assert!(v.validate_shutdown().await.unwrap());
    }

    #[tokio::test]
    async fn besu_clique_silent_signer_vetoes() {
        // current block 100, 4 signers: anything before block 96 is down
        let v = validator(
            ConsensusKind::BesuClique,
            besu_answers(
                "0x64",
                json!([metric("0xaaaa", 97), metric("0xbbbb", 50), metric("0xcccc", 99), metric("0xdddd", 100)]),
            ),
        );
        assert!(matches!(
            v.validate_shutdown().await,
            Err(ConsensusError::CliqueMajority { down: 1, total: 4 })
        ));
    }

    #[tokio::test]
    async fn besu_clique_non_signer_is_safe() {
        let v = validator(
            ConsensusKind::BesuClique,
            besu_answers("0x64", json!([metric("0xbbbb", 99), metric("0xcccc", 100)])),
        );
        assert!(!v.validate_shutdown().await.unwrap());
    }

    #[tokio::test]
    async fn rpc_failure_is_a_veto() {
        let mut rpc = MockClientRpc::new();
        rpc.expect_call()
            .returning(|method, _| Err(ConsensusError::RpcError(method.to_string(), "connection refused".into())));
        let v = ConsensusValidatorImpl::new(ConsensusKind::Istanbul, Box::new(rpc));
        assert!(matches!(
            v.validate_shutdown().await,
            Err(ConsensusError::RpcError(_, _))
        ));
    }
}

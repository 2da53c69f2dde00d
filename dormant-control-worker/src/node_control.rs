// Copyright (c) 2022 MASSA LABS <info@massa.net>

use dormant_consensus::ConsensusValidator;
use dormant_control_exports::{NodeControlConfig, NodeControlError};
use dormant_logging::dormant_trace;
use dormant_models::{NodeState, NodeStatusReport};
use dormant_peers::PeerCoordinator;
use dormant_process::{ProcessController, ProcessError};
use dormant_time::DormantTime;
use parking_lot::Mutex;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, error, info, warn};

/// Inactivity counters, written by the monitor and read by the status RPC
#[derive(Debug, Default)]
pub(crate) struct InactivityCounters {
    inactive_ms: AtomicU64,
}

impl InactivityCounters {
    pub fn add(&self, span: DormantTime) -> DormantTime {
        let total = self
            .inactive_ms
            .fetch_add(span.to_millis(), Ordering::Relaxed)
            .saturating_add(span.to_millis());
        DormantTime::from_millis(total)
    }

    pub fn reset(&self) {
        self.inactive_ms.store(0, Ordering::Relaxed);
    }

    pub fn get(&self) -> DormantTime {
        DormantTime::from_millis(self.inactive_ms.load(Ordering::Relaxed))
    }
}

/// Lifecycle state machine of the node
pub(crate) struct NodeControl {
    pub cfg: NodeControlConfig,
    state: Mutex<NodeState>,
    action_lock: Arc<tokio::sync::Mutex<()>>,
    pub counters: InactivityCounters,
    client: Box<dyn ProcessController>,
    privacy_manager: Box<dyn ProcessController>,
    consensus: Box<dyn ConsensusValidator>,
    pub peers: Box<dyn PeerCoordinator>,
}

impl NodeControl {
    pub fn new(
        cfg: NodeControlConfig,
        initial_state: NodeState,
        client: Box<dyn ProcessController>,
        privacy_manager: Box<dyn ProcessController>,
        consensus: Box<dyn ConsensusValidator>,
        peers: Box<dyn PeerCoordinator>,
    ) -> Self {
        NodeControl {
            cfg,
            state: Mutex::new(initial_state),
            action_lock: Arc::new(tokio::sync::Mutex::new(())),
            counters: InactivityCounters::default(),
            client,
            privacy_manager,
            consensus,
            peers,
        }
    }

    pub fn state(&self) -> NodeState {
        *self.state.lock()
    }

    fn set_state(&self, next: NodeState) {
        let previous = std::mem::replace(&mut *self.state.lock(), next);
        if previous != next {
            info!("node state {} -> {}", previous, next);
            dormant_trace!("node_control.transition", { "from": previous, "to": next });
        }
    }

    /// Take the action lock, or fail with busy if a sequence is already running
    pub fn try_begin_action(&self) -> Result<OwnedMutexGuard<()>, NodeControlError> {
        self.action_lock
            .clone()
            .try_lock_owned()
            .map_err(|_| NodeControlError::Busy(self.state()))
    }

    pub fn is_node_busy(&self) -> Result<(), NodeControlError> {
        let state = self.state();
        if state.is_transient() {
            return Err(NodeControlError::Busy(state));
        }
        Ok(())
    }

    /// Probe both processes, both probes always run
    pub async fn is_node_up(&self) -> bool {
        let client_up = self.client.is_up().await;
        let privacy_manager_up = self.privacy_manager.is_up().await;
        debug!(
            "probe: {} up: {}, {} up: {}",
            self.client.name(),
            client_up,
            self.privacy_manager.name(),
            privacy_manager_up
        );
        client_up && privacy_manager_up
    }

    pub fn status_report(&self) -> NodeStatusReport {
        let status = self.state();
        let limit = self.cfg.inactivity_time;
        let inactive = self.counters.get();
        let time_to_shutdown = if status == NodeState::Up {
            limit.saturating_sub(inactive)
        } else {
            DormantTime::ZERO
        };
        NodeStatusReport {
            status,
            inactive_time_limit: limit.to_secs(),
            inactive_time: inactive.to_secs(),
            time_to_shutdown: time_to_shutdown.to_secs(),
        }
    }

    /// Stop sequence. `_action` proves the action lock is held.
    pub async fn stop_node(&self, _action: &OwnedMutexGuard<()>) -> Result<(), NodeControlError> {
        match self.state() {
            NodeState::Down => {
                debug!("stop requested, node already down");
                return Ok(());
            }
            state if state.is_transient() => return Err(NodeControlError::Busy(state)),
            _ => {}
        }

        self.validate_peers_with_retry().await?;

        self.set_state(NodeState::ShutdownInitiated);
        match self.consensus.validate_shutdown().await {
            Ok(participant) => info!(
                "{} consensus allows the shutdown (participant: {})",
                self.consensus.kind(),
                participant
            ),
            Err(err) => {
                warn!("{} consensus vetoed the shutdown: {}", self.consensus.kind(), err);
                self.set_state(NodeState::Up);
                return Err(NodeControlError::ConsensusVeto(err.to_string()));
            }
        }

        self.set_state(NodeState::ShutdownInprogress);
        let client = self.client.stop().await;
        let privacy_manager = self.privacy_manager.stop().await;
        if let Some(cause) = self.failures(client, privacy_manager) {
            error!(
                "node stuck in {}, operator intervention needed: {}",
                NodeState::ShutdownInprogress,
                cause
            );
            return Err(NodeControlError::ProcessFailure {
                state: NodeState::ShutdownInprogress,
                cause,
            });
        }
        self.set_state(NodeState::Down);
        Ok(())
    }

    /// Start sequence. `_action` proves the action lock is held.
    pub async fn start_node(&self, _action: &OwnedMutexGuard<()>) -> Result<(), NodeControlError> {
        match self.state() {
            NodeState::Up => {
                debug!("start requested, node already up");
                return Ok(());
            }
            state if state.is_transient() => return Err(NodeControlError::Busy(state)),
            _ => {}
        }

        self.set_state(NodeState::StartupInitiated);
        self.set_state(NodeState::StartupInprogress);
        let privacy_manager = self.privacy_manager.start().await;
        let client = self.client.start().await;
        if let Some(cause) = self.failures(client, privacy_manager) {
            error!(
                "node stuck in {}, operator intervention needed: {}",
                NodeState::StartupInprogress,
                cause
            );
            return Err(NodeControlError::ProcessFailure {
                state: NodeState::StartupInprogress,
                cause,
            });
        }
        self.counters.reset();
        self.set_state(NodeState::Up);
        Ok(())
    }

    /// Make sure the node is up. A node found up is reported ready without
    /// any transition, otherwise it is started right away.
    pub async fn prepare_node(&self) -> Result<(), NodeControlError> {
        if self.is_node_up().await {
            if self.state() == NodeState::Down {
                warn!("node found up while marked down, correcting the state");
                self.set_state(NodeState::Up);
            }
            return Ok(());
        }
        let action = self.try_begin_action()?;
        if self.state() == NodeState::Up {
            warn!("node marked up but found down, restarting it");
            self.set_state(NodeState::Down);
        }
        info!("waking the node up");
        self.start_node(&action).await
    }

    async fn validate_peers_with_retry(&self) -> Result<(), NodeControlError> {
        let attempts = self.cfg.peer_validation_retries;
        let mut cause = String::new();
        for attempt in 1..=attempts {
            match self.peers.validate_peers().await {
                Ok(reports) => {
                    for report in &reports {
                        debug!("peer {}: {}", report.peer, report.report);
                    }
                    return Ok(());
                }
                Err(err) => {
                    warn!(
                        "peer validation {}/{} failed: {}",
                        attempt, attempts, err
                    );
                    cause = err.to_string();
                }
            }
            if attempt < attempts {
                let wait = self.retry_wait();
                debug!("next peer validation in {}ms", wait.to_millis());
                tokio::time::sleep(wait.to_duration()).await;
            }
        }
        Err(NodeControlError::PeerValidationFailed { attempts, cause })
    }

    fn retry_wait(&self) -> DormantTime {
        let min = self.cfg.peer_retry_wait_min.to_millis();
        let max = self.cfg.peer_retry_wait_max.to_millis().max(min);
        DormantTime::from_millis(rand::thread_rng().gen_range(min..=max))
    }

    fn failures(
        &self,
        client: Result<(), ProcessError>,
        privacy_manager: Result<(), ProcessError>,
    ) -> Option<String> {
        let failures: Vec<String> = [
            (self.client.name(), client),
            (self.privacy_manager.name(), privacy_manager),
        ]
        .into_iter()
        .filter_map(|(name, result)| result.err().map(|err| format!("{}: {}", name, err)))
        .collect();
        if failures.is_empty() {
            None
        } else {
            Some(failures.join(", "))
        }
    }
}

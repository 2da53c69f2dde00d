// Copyright (c) 2022 MASSA LABS <info@massa.net>

use dormant_control_exports::NodeControlController;
use dormant_models::NodeState;
use dormant_time::DormantTime;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::controller::NodeControlControllerImpl;

/// Counts inactivity and puts the node to sleep once the limit is reached.
/// Optionally wakes a sleeping node up periodically so it catches up with the chain.
pub(crate) struct InactivityMonitor {
    controller: NodeControlControllerImpl,
    reset_rx: mpsc::UnboundedReceiver<()>,
    stop_rx: watch::Receiver<bool>,
    since_resync: DormantTime,
}

impl InactivityMonitor {
    pub fn new(
        controller: NodeControlControllerImpl,
        reset_rx: mpsc::UnboundedReceiver<()>,
        stop_rx: watch::Receiver<bool>,
    ) -> Self {
        InactivityMonitor {
            controller,
            reset_rx,
            stop_rx,
            since_resync: DormantTime::ZERO,
        }
    }

    pub async fn run(mut self) {
        let tick = self.controller.node.cfg.tick_interval;
        let mut ticker = tokio::time::interval(tick.to_duration());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick completes immediately
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = self.stop_rx.changed() => break,
                Some(()) = self.reset_rx.recv() => self.controller.node.counters.reset(),
                _ = ticker.tick() => self.on_tick(tick).await,
            }
        }
        debug!("inactivity monitor stopped");
    }

    async fn on_tick(&mut self, tick: DormantTime) {
        let node = self.controller.node.clone();
        let inactive = node.counters.add(tick);

        if node.state() == NodeState::Up && inactive >= node.cfg.inactivity_time {
            info!(
                "no activity for {}, stopping the node",
                inactive.format_duration()
            );
            match self.controller.request_stop_node().await {
                Ok(()) => info!("node stopped after inactivity"),
                Err(err) => warn!("inactivity stop did not go through: {}", err),
            }
            node.counters.reset();
        }

        if node.cfg.resync_time.is_zero() {
            return;
        }
        self.since_resync = self.since_resync.saturating_add(tick);
        if self.since_resync < node.cfg.resync_time {
            return;
        }
        self.since_resync = DormantTime::ZERO;
        if node.state() == NodeState::Down {
            info!("waking the node up to resync");
            node.counters.reset();
            if let Err(err) = self.controller.request_start_node().await {
                warn!("resync start failed: {}", err);
            }
        }
    }
}

// Copyright (c) 2022 MASSA LABS <info@massa.net>

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::{ProcessConfig, ProcessController, ProcessDriver, ProcessError, Upchecker};

/// Process controller over a driver and an up-check
pub struct ProcessControllerImpl {
    cfg: ProcessConfig,
    driver: ProcessDriver,
    upchecker: Upchecker,
    /// cached up/down status
    status: AtomicBool,
}

impl ProcessControllerImpl {
    /// Create a controller. The cached status starts as down until the first probe.
    pub fn new(cfg: ProcessConfig) -> Result<Self, ProcessError> {
        cfg.check()?;
        Ok(ProcessControllerImpl {
            driver: ProcessDriver::from_config(&cfg),
            upchecker: Upchecker::new(cfg.upcheck.clone()),
            cfg,
            status: AtomicBool::new(false),
        })
    }

    /// Poll the up-check until the process reaches `target` or retries run out
    async fn wait_for(&self, target: bool) -> bool {
        for attempt in 1..=self.cfg.upcheck_max_retries {
            if self.is_up().await == target {
                return true;
            }
            debug!(
                "{}: waiting to be {} ({}/{})",
                self.cfg.name,
                if target { "up" } else { "down" },
                attempt,
                self.cfg.upcheck_max_retries
            );
            tokio::time::sleep(self.cfg.upcheck_poll_interval.to_duration()).await;
        }
        false
    }
}

#[async_trait]
impl ProcessController for ProcessControllerImpl {
    async fn start(&self) -> Result<(), ProcessError> {
        if self.status() {
            debug!("{}: already up", self.cfg.name);
            return Ok(());
        }
        self.driver.start(&self.cfg.name).await?;
        if self.wait_for(true).await {
            info!("{}: started", self.cfg.name);
            Ok(())
        } else {
            warn!("{}: still down after start", self.cfg.name);
            Err(ProcessError::StartFailed(self.cfg.name.clone()))
        }
    }

    async fn stop(&self) -> Result<(), ProcessError> {
        if !self.status() {
            debug!("{}: already down", self.cfg.name);
            return Ok(());
        }
        self.driver.stop(&self.cfg.name).await?;
        if self.wait_for(false).await {
            info!("{}: stopped", self.cfg.name);
            Ok(())
        } else {
            warn!("{}: still up after stop", self.cfg.name);
            Err(ProcessError::StopFailed(self.cfg.name.clone()))
        }
    }

    async fn is_up(&self) -> bool {
        let up = self.upchecker.probe().await;
        self.status.store(up, Ordering::SeqCst);
        up
    }

    fn status(&self) -> bool {
        self.status.load(Ordering::SeqCst)
    }

    fn name(&self) -> String {
        self.cfg.name.clone()
    }
}

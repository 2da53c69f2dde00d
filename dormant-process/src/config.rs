// Copyright (c) 2022 MASSA LABS <info@massa.net>

use dormant_time::DormantTime;
use serde::Deserialize;

use crate::ProcessError;

/// How the process is driven
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ControlType {
    /// plain commands run on the host
    Shell,
    /// a docker container started and stopped with the docker cli
    Docker,
}

/// What a successful up-check response looks like
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UpcheckReturnType {
    /// HTTP 200 with a body equal to `expected`
    String,
    /// JSON-RPC response carrying a result and no error
    RpcResult,
}

/// Up-check settings of a managed process
#[derive(Debug, Deserialize, Clone)]
pub struct UpcheckConfig {
    /// url probed
    pub url: String,
    /// HTTP method of the probe
    pub method: String,
    /// request body, empty for none
    #[serde(default)]
    pub body: String,
    /// how the response is judged
    pub return_type: UpcheckReturnType,
    /// expected body (string) or result (rpcresult), empty to accept anything
    #[serde(default)]
    pub expected: String,
    /// timeout of one probe
    pub timeout: DormantTime,
}

/// Settings of a managed process
#[derive(Debug, Deserialize, Clone)]
pub struct ProcessConfig {
    /// name used in logs
    pub name: String,
    /// driver
    pub control_type: ControlType,
    /// container id, docker driver only
    #[serde(default)]
    pub container_id: String,
    /// start command line, shell driver only
    #[serde(default)]
    pub start_command: Vec<String>,
    /// stop command line, shell driver only
    #[serde(default)]
    pub stop_command: Vec<String>,
    /// up-check settings
    pub upcheck: UpcheckConfig,
    /// delay between two up-checks while waiting for a start or a stop
    pub upcheck_poll_interval: DormantTime,
    /// number of up-checks before a start or a stop is declared failed
    pub upcheck_max_retries: u32,
}

impl ProcessConfig {
    /// Basic sanity checks
    pub fn check(&self) -> Result<(), ProcessError> {
        if self.name.is_empty() {
            return Err(ProcessError::InvalidConfig("empty process name".into()));
        }
        match self.control_type {
            ControlType::Docker if self.container_id.is_empty() => {
                return Err(ProcessError::InvalidConfig(format!(
                    "{}: docker control requires a container id",
                    self.name
                )));
            }
            ControlType::Shell if self.start_command.is_empty() || self.stop_command.is_empty() => {
                return Err(ProcessError::InvalidConfig(format!(
                    "{}: shell control requires start and stop commands",
                    self.name
                )));
            }
            _ => {}
        }
        if self.upcheck.url.is_empty() {
            return Err(ProcessError::InvalidConfig(format!(
                "{}: empty upcheck url",
                self.name
            )));
        }
        if self.upcheck_max_retries == 0 {
            return Err(ProcessError::InvalidConfig(format!(
                "{}: upcheck_max_retries must be positive",
                self.name
            )));
        }
        Ok(())
    }
}

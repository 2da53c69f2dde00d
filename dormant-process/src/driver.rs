// Copyright (c) 2022 MASSA LABS <info@massa.net>

use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::{ControlType, ProcessConfig, ProcessError};

/// The command side of a managed process
#[derive(Debug, Clone)]
pub enum ProcessDriver {
    /// commands run on the host. The start command is left running in the
    /// background, the stop command must complete successfully.
    Shell {
        /// start command line
        start_command: Vec<String>,
        /// stop command line
        stop_command: Vec<String>,
    },
    /// a container driven through the docker cli
    Docker {
        /// container id or name
        container_id: String,
    },
}

impl ProcessDriver {
    /// Build the driver described by the configuration
    pub fn from_config(cfg: &ProcessConfig) -> Self {
        match cfg.control_type {
            ControlType::Shell => ProcessDriver::Shell {
                start_command: cfg.start_command.clone(),
                stop_command: cfg.stop_command.clone(),
            },
            ControlType::Docker => ProcessDriver::Docker {
                container_id: cfg.container_id.clone(),
            },
        }
    }

    /// Issue the start command
    pub async fn start(&self, name: &str) -> Result<(), ProcessError> {
        match self {
            ProcessDriver::Shell { start_command, .. } => spawn_detached(name, start_command),
            ProcessDriver::Docker { container_id } => {
                run_to_completion(name, &docker_command("start", container_id)).await
            }
        }
    }

    /// Issue the stop command
    pub async fn stop(&self, name: &str) -> Result<(), ProcessError> {
        match self {
            ProcessDriver::Shell { stop_command, .. } => {
                run_to_completion(name, stop_command).await
            }
            ProcessDriver::Docker { container_id } => {
                run_to_completion(name, &docker_command("stop", container_id)).await
            }
        }
    }
}

fn docker_command(action: &str, container_id: &str) -> Vec<String> {
    vec!["docker".into(), action.into(), container_id.into()]
}

fn split_command<'a>(
    name: &str,
    command_line: &'a [String],
) -> Result<(&'a String, &'a [String]), ProcessError> {
    command_line
        .split_first()
        .ok_or_else(|| ProcessError::InvalidConfig(format!("{}: empty command", name)))
}

fn spawn_detached(name: &str, command_line: &[String]) -> Result<(), ProcessError> {
    let (program, args) = split_command(name, command_line)?;
    info!("{}: spawning {:?}", name, command_line);
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    // reap the child whenever it exits
    let name = name.to_string();
    tokio::spawn(async move {
        match child.wait().await {
            Ok(status) => debug!("{}: start command exited with {}", name, status),
            Err(err) => warn!("{}: could not wait for start command: {}", name, err),
        }
    });
    Ok(())
}

async fn run_to_completion(name: &str, command_line: &[String]) -> Result<(), ProcessError> {
    let (program, args) = split_command(name, command_line)?;
    info!("{}: running {:?}", name, command_line);
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .await?;
    if output.status.success() {
        Ok(())
    } else {
        Err(ProcessError::CommandError(
            name.to_string(),
            format!(
                "{} ({})",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        ))
    }
}

// Copyright (c) 2022 MASSA LABS <info@massa.net>
//! Build the node-manager settings
//!
//! ---
//! The configuration is read from three layers, each one overriding the previous:
//! 1. the file given on the command line, else the path in the
//!    `DORMANT_CONFIG_PATH` environment variable, else `base_config/config.toml`
//! 2. the file in `DORMANT_CONFIG_OVERRIDE_PATH` (`config/config.toml` by
//!    default), when it exists
//! 3. environment variables prefixed with `DORMANT_`, nested keys separated by
//!    `__` (`DORMANT_NODE_CONTROL__INACTIVITY_TIME=60000`)

use displaydoc::Display;
use dormant_api_exports::config::APIConfig;
use dormant_consensus::ConsensusConfig;
use dormant_control_exports::NodeControlConfig;
use dormant_peers::PeersConfig;
use dormant_process::ProcessConfig;
use dormant_proxy::ProxyConfig;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BASE_CONFIG_PATH: &str = "base_config/config.toml";
const OVERRIDE_CONFIG_PATH: &str = "config/config.toml";
const ENV_PREFIX: &str = "DORMANT";

/// Settings errors
#[non_exhaustive]
#[derive(Display, Error, Debug)]
pub enum SettingsError {
    /// could not load the configuration: {0}
    ConfigError(#[from] config::ConfigError),
    /// invalid settings: {0}
    InvalidSettings(String),
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct LoggingSettings {
    pub level: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub node_control: NodeControlConfig,
    pub client: ProcessConfig,
    pub privacy_manager: ProcessConfig,
    pub consensus: ConsensusConfig,
    pub peers: PeersConfig,
    pub api: APIConfig,
    pub proxies: Vec<ProxyConfig>,
}

/// Merge the configuration layers into `Settings`
pub fn build_settings(config_path: Option<&Path>) -> Result<Settings, SettingsError> {
    let config_path = match config_path {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(
            std::env::var("DORMANT_CONFIG_PATH").unwrap_or_else(|_| BASE_CONFIG_PATH.to_string()),
        ),
    };
    let mut builder =
        config::Config::builder().add_source(config::File::from(config_path.as_path()));

    let config_override_path = std::env::var("DORMANT_CONFIG_OVERRIDE_PATH")
        .unwrap_or_else(|_| OVERRIDE_CONFIG_PATH.to_string());
    if Path::new(&config_override_path).is_file() {
        builder = builder.add_source(config::File::from(Path::new(&config_override_path)));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;
    Ok(settings.try_deserialize()?)
}

fn invalid(err: impl ToString) -> SettingsError {
    SettingsError::InvalidSettings(err.to_string())
}

impl Settings {
    /// Basic sanity checks over every section
    pub fn check(&self) -> Result<(), SettingsError> {
        self.node_control.check().map_err(invalid)?;
        self.client.check().map_err(invalid)?;
        self.privacy_manager.check().map_err(invalid)?;
        if self.peers.self_name.is_empty() {
            return Err(invalid("peers.self_name is empty"));
        }
        // the roster entry of this node is found by this name
        if self.peers.self_name != self.node_control.name {
            return Err(invalid(format!(
                "peers.self_name {} differs from node_control.name {}",
                self.peers.self_name, self.node_control.name
            )));
        }
        if self.consensus.rpc_url.is_empty() {
            return Err(invalid("consensus.rpc_url is empty"));
        }
        if self.proxies.is_empty() {
            return Err(invalid("at least one proxy is required"));
        }
        let mut names = HashSet::new();
        let mut addrs = HashSet::new();
        for proxy in &self.proxies {
            proxy.check().map_err(invalid)?;
            if !names.insert(proxy.name.as_str()) {
                return Err(invalid(format!("proxy name {} used twice", proxy.name)));
            }
            if !addrs.insert(proxy.proxy_addr) {
                return Err(invalid(format!(
                    "proxy address {} used twice",
                    proxy.proxy_addr
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn shipped_config() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join(BASE_CONFIG_PATH)
    }

    #[test]
    #[serial]
    fn shipped_config_is_valid() {
        let settings = build_settings(Some(&shipped_config())).unwrap();
        settings.check().unwrap();
        assert_eq!(settings.proxies.len(), 3);
        assert_eq!(settings.node_control.peer_validation_retries, 5);
    }

    #[test]
    #[serial]
    fn environment_overrides_files() {
        std::env::set_var("DORMANT_NODE_CONTROL__INACTIVITY_TIME", "5000");
        let settings = build_settings(Some(&shipped_config()));
        std::env::remove_var("DORMANT_NODE_CONTROL__INACTIVITY_TIME");
        assert_eq!(
            settings.unwrap().node_control.inactivity_time.to_millis(),
            5000
        );
    }

    #[test]
    #[serial]
    fn override_file_is_merged() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[logging]\nlevel = 4").unwrap();
        std::env::set_var("DORMANT_CONFIG_OVERRIDE_PATH", file.path());
        let settings = build_settings(Some(&shipped_config()));
        std::env::remove_var("DORMANT_CONFIG_OVERRIDE_PATH");
        assert_eq!(settings.unwrap().logging.level, 4);
    }

    #[test]
    #[serial]
    fn duplicated_proxy_names_are_rejected() {
        let mut settings = build_settings(Some(&shipped_config())).unwrap();
        let mut twin = settings.proxies[0].clone();
        twin.proxy_addr = "127.0.0.1:29999".parse().unwrap();
        settings.proxies.push(twin);
        assert!(matches!(
            settings.check(),
            Err(SettingsError::InvalidSettings(_))
        ));
    }

    #[test]
    #[serial]
    fn node_name_must_match_the_roster_name() {
        let mut settings = build_settings(Some(&shipped_config())).unwrap();
        settings.peers.self_name = "node2".to_string();
        match settings.check() {
            Err(SettingsError::InvalidSettings(msg)) => assert!(msg.contains("node2")),
            other => panic!("unexpected check result {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn missing_config_file_is_an_error() {
        assert!(matches!(
            build_settings(Some(Path::new("does/not/exist.toml"))),
            Err(SettingsError::ConfigError(_))
        ));
    }
}

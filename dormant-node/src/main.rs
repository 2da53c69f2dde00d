// Copyright (c) 2022 MASSA LABS <info@massa.net>
//! Node-manager sidecar: hibernates the blockchain client and its privacy
//! manager when no traffic reaches them, and wakes them up on demand.
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

use anyhow::Result;
use clap::Parser;
use dormant_api::{RpcServer, API};
use dormant_consensus::ConsensusValidatorImpl;
use dormant_control_exports::NodeControlController;
use dormant_control_worker::start_node_control_worker;
use dormant_logging::setup_logging;
use dormant_peers::{JsonRpcPeerClient, PeerCoordinatorImpl, PeerRoster};
use dormant_process::ProcessControllerImpl;
use dormant_proxy::start_proxy;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

mod settings;

use settings::{build_settings, Settings};

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Configuration file. Defaults to `DORMANT_CONFIG_PATH`, then `base_config/config.toml`
    #[arg(short, long)]
    config: Option<PathBuf>,
}

async fn run(settings: Settings) -> Result<()> {
    let client = ProcessControllerImpl::new(settings.client.clone())?;
    let privacy_manager = ProcessControllerImpl::new(settings.privacy_manager.clone())?;
    let consensus = ConsensusValidatorImpl::from_config(&settings.consensus)?;
    let roster = PeerRoster::load(&settings.peers.peers_file)?;
    let peers = PeerCoordinatorImpl::new(
        settings.peers.self_name.clone(),
        roster,
        Arc::new(JsonRpcPeerClient::new(settings.peers.rpc_timeout)),
    );

    // launch node control
    let (mut node_control_manager, node_controller) = start_node_control_worker(
        settings.node_control.clone(),
        Box::new(client),
        Box::new(privacy_manager),
        Box::new(consensus),
        Box::new(peers),
    )
    .await?;

    // launch control API
    let api = API::new(node_controller.clone());
    let api_handle = api.serve(&settings.api.bind, &settings.api).await?;

    // launch proxies
    let mut proxy_handles = Vec::with_capacity(settings.proxies.len());
    for proxy_config in settings.proxies {
        proxy_handles.push(start_proxy(proxy_config, node_controller.clone()).await?);
    }
    info!(
        "node-manager {} ready, node is {}",
        settings.node_control.name,
        node_controller.get_node_status()
    );

    wait_for_stop_signal().await?;

    for proxy_handle in proxy_handles.into_iter().rev() {
        proxy_handle.stop().await;
    }
    api_handle.stop().await;
    node_control_manager.stop().await;
    info!("node-manager stopped, node left {}", node_controller.get_node_status());
    Ok(())
}

async fn wait_for_stop_signal() -> Result<()> {
    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            res?;
            info!("interrupt signal received");
        }
        _ = terminate.recv() => info!("terminate signal received"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = build_settings(args.config.as_deref())?;
    setup_logging(settings.logging.level);
    settings.check()?;
    run(settings).await
}

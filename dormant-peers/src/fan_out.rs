// Copyright (c) 2022 MASSA LABS <info@massa.net>

use dormant_models::PeerDescriptor;
use std::future::Future;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::PeerError;

/// Run `call` against every peer, one task each, and gather the successful
/// answers with the name of the peer that gave them.
///
/// Answers go through a channel drained by a collector task. The round ends
/// when every request task is done, so a peer that failed or panicked simply
/// has no entry in the result.
pub(crate) async fn fan_out<T, F, Fut>(
    peers: Vec<PeerDescriptor>,
    call: F,
) -> Result<Vec<(String, T)>, PeerError>
where
    T: Send + 'static,
    F: Fn(PeerDescriptor) -> Fut,
    Fut: Future<Output = Result<T, PeerError>> + Send + 'static,
{
    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<(String, T)>();
    let expected = peers.len();
    let collector = tokio::spawn(async move {
        let mut results = Vec::with_capacity(expected);
        while let Some(result) = result_rx.recv().await {
            results.push(result);
        }
        results
    });

    let mut requests = JoinSet::new();
    for peer in peers {
        let result_tx = result_tx.clone();
        let request = call(peer.clone());
        requests.spawn(async move {
            match request.await {
                Ok(answer) => {
                    debug!("peer {} answered", peer.name);
                    let _ = result_tx.send((peer.name, answer));
                }
                Err(err) => warn!("no answer from peer {}: {}", peer.name, err),
            }
        });
    }
    drop(result_tx);

    while let Some(done) = requests.join_next().await {
        if let Err(err) = done {
            warn!("peer request task failed: {}", err);
        }
    }

    collector
        .await
        .map_err(|err| PeerError::InternalError(format!("result collector failed: {}", err)))
}

//! Chain runtime integration.
//!
//! Bridges the sync game loop with the async chain client. The game loop
//! sends [`ChainRequest`]s and polls [`ChainEvent`]s once per frame; a single
//! worker task serves requests one at a time in arrival order.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::client::{ChainClient, Receipt, RelayClient};
use crate::config::RelayConfig;
use crate::error::ChainError;
use crate::submission::ScoreSubmission;
use crate::types::LeaderboardEntry;

/// Work for the chain worker.
#[derive(Debug, Clone)]
pub enum ChainRequest {
    Submit(ScoreSubmission),
    TopScores { limit: u32 },
    Gm,
}

impl ChainRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            ChainRequest::Submit(_) => RequestKind::Submit,
            ChainRequest::TopScores { .. } => RequestKind::TopScores,
            ChainRequest::Gm => RequestKind::Gm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Submit,
    TopScores,
    Gm,
}

/// Result of one request, delivered back to the game loop.
#[derive(Debug)]
pub enum ChainEvent {
    Submitted {
        episode_id: u32,
        score: u64,
        receipt: Receipt,
    },
    Leaderboard(Vec<LeaderboardEntry>),
    GmSent(Receipt),
    Failed {
        kind: RequestKind,
        error: ChainError,
    },
}

/// Serve requests until the request channel closes.
pub async fn run_worker<C: ChainClient>(
    client: C,
    mut requests: mpsc::UnboundedReceiver<ChainRequest>,
    events: mpsc::UnboundedSender<ChainEvent>,
) {
    while let Some(request) = requests.recv().await {
        let kind = request.kind();
        let event = match request {
            ChainRequest::Submit(sub) => client
                .submit_score(&sub.name, sub.score)
                .await
                .map(|receipt| {
                    info!(score = sub.score, tx = %receipt.tx_hash, "score submitted");
                    ChainEvent::Submitted {
                        episode_id: sub.episode_id,
                        score: sub.score,
                        receipt,
                    }
                }),
            ChainRequest::TopScores { limit } => {
                client.top_scores(limit).await.map(ChainEvent::Leaderboard)
            }
            ChainRequest::Gm => client.gm().await.map(ChainEvent::GmSent),
        }
        .unwrap_or_else(|error| {
            warn!(?kind, %error, "chain request failed");
            ChainEvent::Failed { kind, error }
        });

        if events.send(event).is_err() {
            break;
        }
    }
    debug!("chain worker stopped");
}

/// Running chain bridge.
pub struct ChainBridge {
    rt: Runtime,
    req_tx: mpsc::UnboundedSender<ChainRequest>,
    event_rx: mpsc::UnboundedReceiver<ChainEvent>,
    pending: usize,
}

impl ChainBridge {
    /// Start a worker serving `client` on a private runtime.
    pub fn start<C: ChainClient + 'static>(client: C) -> Result<Self> {
        let rt = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("chain-worker")
            .enable_all()
            .build()
            .context("failed to create chain runtime")?;

        let (req_tx, req_rx) = mpsc::unbounded_channel::<ChainRequest>();
        let (event_tx, event_rx) = mpsc::unbounded_channel::<ChainEvent>();
        rt.spawn(run_worker(client, req_rx, event_tx));

        Ok(Self {
            rt,
            req_tx,
            event_rx,
            pending: 0,
        })
    }

    /// Start a relay-backed bridge from environment variables.
    ///
    /// Returns `Ok(None)` if `G2048_CHAIN_DISABLED` is set.
    pub fn start_from_env() -> Result<Option<Self>> {
        if RelayConfig::is_disabled() {
            info!("chain submission disabled by environment");
            return Ok(None);
        }
        let config = RelayConfig::from_env();
        info!(relay = %config.addr(), "starting chain bridge");
        Self::start(RelayClient::new(config)).map(Some)
    }

    /// Queue a request. Returns false if the worker has stopped.
    pub fn request(&mut self, request: ChainRequest) -> bool {
        if self.req_tx.send(request).is_err() {
            return false;
        }
        self.pending += 1;
        true
    }

    /// Next finished request, without blocking.
    pub fn try_recv(&mut self) -> Option<ChainEvent> {
        let event = self.event_rx.try_recv().ok()?;
        self.pending = self.pending.saturating_sub(1);
        Some(event)
    }

    /// Wait up to `timeout` for the next finished request.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<ChainEvent> {
        let rx = &mut self.event_rx;
        let event = self
            .rt
            .block_on(async { tokio::time::timeout(timeout, rx.recv()).await.ok().flatten() })?;
        self.pending = self.pending.saturating_sub(1);
        Some(event)
    }

    /// Requests sent but not yet answered.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn is_busy(&self) -> bool {
        self.pending > 0
    }
}

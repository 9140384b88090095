//! Chain clients.
//!
//! [`ChainClient`] is the seam between the game and whatever signs
//! transactions. [`RelayClient`] forwards calls to a relay process over TCP;
//! [`MemoryChain`] keeps the leaderboard in memory for offline play.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::config::RelayConfig;
use crate::error::ChainError;
use crate::protocol::{
    create_gm, create_submit_score, create_top_scores, parse_response, ErrorCode, ParsedResponse,
};
use crate::types::LeaderboardEntry;

/// Proof that the chain accepted a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub tx_hash: String,
}

/// External chain capability consumed by the game.
pub trait ChainClient: Send + Sync {
    /// Record `score` under `name` for the connected wallet.
    fn submit_score(
        &self,
        name: &str,
        score: u64,
    ) -> impl Future<Output = Result<Receipt, ChainError>> + Send;

    /// Best scores, highest first, at most `limit` entries.
    fn top_scores(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<LeaderboardEntry>, ChainError>> + Send;

    /// Send the "gm" greeting transaction.
    fn gm(&self) -> impl Future<Output = Result<Receipt, ChainError>> + Send;
}

/// Talks to a relay: one TCP connection per request, one JSON line each way.
#[derive(Debug)]
pub struct RelayClient {
    config: RelayConfig,
    seq: AtomicU64,
}

impl RelayClient {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            config,
            seq: AtomicU64::new(1),
        }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }

    /// Send `msg` and wait for the response echoing `seq`.
    async fn request<M: Serialize>(&self, seq: u64, msg: &M) -> Result<ParsedResponse, ChainError> {
        let mut line = serde_json::to_vec(msg)?;
        line.push(b'\n');

        let addr = self.config.addr();
        let exchange = async {
            let stream = TcpStream::connect(&addr)
                .await
                .map_err(|source| ChainError::Connect {
                    addr: addr.clone(),
                    source,
                })?;
            let (reader, mut writer) = stream.into_split();
            writer.write_all(&line).await?;
            writer.flush().await?;

            let mut reader = BufReader::new(reader);
            let mut buf = String::new();
            loop {
                buf.clear();
                if reader.read_line(&mut buf).await? == 0 {
                    return Err(ChainError::Closed);
                }
                let text = buf.trim();
                if text.is_empty() {
                    continue;
                }
                let response = parse_response(text)?;
                if response.seq() == seq {
                    return Ok(response);
                }
                debug!(expected = seq, got = response.seq(), "skipping stale relay message");
            }
        };

        match tokio::time::timeout(self.config.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(ChainError::Timeout(self.config.timeout)),
        }
    }

    fn expect_receipt(response: ParsedResponse) -> Result<Receipt, ChainError> {
        match response {
            ParsedResponse::Receipt(m) => Ok(Receipt { tx_hash: m.tx_hash }),
            ParsedResponse::Error(m) => Err(ChainError::relay(m.code, m.message)),
            other => Err(ChainError::Unexpected(other.kind())),
        }
    }
}

impl ChainClient for RelayClient {
    async fn submit_score(&self, name: &str, score: u64) -> Result<Receipt, ChainError> {
        let seq = self.next_seq();
        debug!(seq, name, score, "submit_score");
        let response = self.request(seq, &create_submit_score(seq, name, score)).await;
        let result = response.and_then(Self::expect_receipt);
        if let Err(e) = &result {
            warn!(seq, error = %e, "submit_score failed");
        }
        result
    }

    async fn top_scores(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, ChainError> {
        let seq = self.next_seq();
        debug!(seq, limit, "top_scores");
        match self.request(seq, &create_top_scores(seq, limit)).await? {
            ParsedResponse::TopScores(m) => Ok(m
                .entries
                .into_iter()
                .take(limit as usize)
                .map(LeaderboardEntry::from)
                .collect()),
            ParsedResponse::Error(m) => Err(ChainError::relay(m.code, m.message)),
            other => Err(ChainError::Unexpected(other.kind())),
        }
    }

    async fn gm(&self) -> Result<Receipt, ChainError> {
        let seq = self.next_seq();
        debug!(seq, "gm");
        let response = self.request(seq, &create_gm(seq)).await?;
        Self::expect_receipt(response)
    }
}

/// In-process leaderboard with the relay's validation rules.
#[derive(Debug)]
pub struct MemoryChain {
    player: String,
    state: Mutex<Ledger>,
}

#[derive(Debug, Default)]
struct Ledger {
    entries: Vec<LeaderboardEntry>,
    tx_count: u64,
    offline: bool,
}

impl Ledger {
    fn next_tx(&mut self) -> Receipt {
        self.tx_count += 1;
        Receipt {
            tx_hash: format!("0x{:064x}", self.tx_count),
        }
    }
}

impl MemoryChain {
    pub fn new(player: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            state: Mutex::new(Ledger::default()),
        }
    }

    /// Pre-populate the leaderboard.
    pub fn with_entries(self, entries: Vec<LeaderboardEntry>) -> Self {
        {
            let mut ledger = self.lock();
            ledger.entries = entries;
            ledger.entries.sort_by(|a, b| b.score.cmp(&a.score));
        }
        self
    }

    /// Simulate a missing wallet: every call fails until re-enabled.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    pub fn entries(&self) -> Vec<LeaderboardEntry> {
        self.lock().entries.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Ledger> {
        // A poisoned ledger is still a valid ledger.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_online(ledger: &Ledger) -> Result<(), ChainError> {
        if ledger.offline {
            return Err(ChainError::relay(
                ErrorCode::WalletUnavailable,
                "no wallet connected",
            ));
        }
        Ok(())
    }
}

impl Default for MemoryChain {
    fn default() -> Self {
        Self::new("local")
    }
}

impl ChainClient for MemoryChain {
    async fn submit_score(&self, name: &str, score: u64) -> Result<Receipt, ChainError> {
        let mut ledger = self.lock();
        Self::check_online(&ledger)?;
        let name = name.trim();
        if name.is_empty() || score == 0 {
            return Err(ChainError::relay(
                ErrorCode::InvalidRequest,
                "name and a non-zero score are required",
            ));
        }

        // Insert after any equal score so earlier submissions rank first.
        let at = ledger.entries.partition_point(|e| e.score >= score);
        let entry = LeaderboardEntry {
            player: self.player.clone(),
            name: name.to_string(),
            score,
        };
        ledger.entries.insert(at, entry);
        Ok(ledger.next_tx())
    }

    async fn top_scores(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, ChainError> {
        let ledger = self.lock();
        Self::check_online(&ledger)?;
        Ok(ledger.entries.iter().take(limit as usize).cloned().collect())
    }

    async fn gm(&self) -> Result<Receipt, ChainError> {
        let mut ledger = self.lock();
        Self::check_online(&ledger)?;
        Ok(ledger.next_tx())
    }
}

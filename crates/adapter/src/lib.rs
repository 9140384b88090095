//! Adapter module - score submission to an external chain relay
//!
//! The game never signs anything itself. A separate relay process owns the
//! wallet, the network selection and transaction signing; this crate sends it
//! requests and turns its answers into events the game loop can poll.
//!
//! # Protocol Overview
//!
//! The relay speaks a **line-delimited JSON protocol** over TCP:
//!
//! 1. **Connection**: one connection per request (default: 127.0.0.1:7780)
//! 2. **Request**: the game writes one JSON line
//! 3. **Response**: the relay answers with one JSON line echoing `seq`
//!
//! # Message Types
//!
//! ## Game → Relay
//!
//! - **submit_score**: record `score` under player `name`
//! - **top_scores**: read the best `limit` entries
//! - **gm**: send the greeting transaction
//!
//! ## Relay → Game
//!
//! - **receipt**: transaction hash of an accepted transaction
//! - **top_scores**: leaderboard entries, highest score first
//! - **error**: error `code` and human-readable `message`
//!
//! # Environment Variables
//!
//! - `G2048_RELAY_HOST`: relay address (default: "127.0.0.1")
//! - `G2048_RELAY_PORT`: relay port (default: 7780)
//! - `G2048_RELAY_TIMEOUT_MS`: per-request budget (default: 5000)
//! - `G2048_CHAIN_DISABLED`: set to "1" or "true" to play without a chain
//!
//! # Example Protocol Flow
//!
//! ```text
//! Game  -> Relay: {"type":"submit_score","seq":1,"ts":1700000000000,"name":"ann","score":2048}
//! Relay -> Game:  {"type":"receipt","seq":1,"ts":1700000000420,"tx_hash":"0x5e1f..."}
//! Game  -> Relay: {"type":"top_scores","seq":2,"ts":1700000001000,"limit":10}
//! Relay -> Game:  {"type":"top_scores","seq":2,"ts":1700000001100,"entries":[{"player":"0xab..","name":"ann","score":2048}]}
//! ```
//!
//! # Implementation
//!
//! - [`client::ChainClient`] is the async seam; [`client::RelayClient`] and
//!   [`client::MemoryChain`] implement it
//! - [`submission::ScoreSubmission`] enforces the submission rules on a
//!   snapshot, so gameplay never waits on the chain
//! - [`runtime::ChainBridge`] owns a **tokio** runtime and a worker task

pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod runtime;
pub mod submission;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use client::{ChainClient, MemoryChain, Receipt, RelayClient};
pub use config::RelayConfig;
pub use error::{ChainError, SubmissionError};
pub use protocol::ErrorCode;
pub use runtime::{run_worker, ChainBridge, ChainEvent, ChainRequest, RequestKind};
pub use submission::ScoreSubmission;

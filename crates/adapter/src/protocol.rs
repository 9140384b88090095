//! Protocol module - JSON message types for the chain relay
//!
//! Line-delimited JSON. Every message carries `type`, `seq` (sequence
//! number, echoed back by the relay) and `ts` (timestamp in ms).

use serde::{Deserialize, Serialize};

use crate::types::LeaderboardEntry;

// ============== Game -> Relay Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubmitScoreType {
    #[default]
    #[serde(rename = "submit_score")]
    SubmitScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TopScoresType {
    #[default]
    #[serde(rename = "top_scores")]
    TopScores,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GmType {
    #[default]
    #[serde(rename = "gm")]
    Gm,
}

/// Record a final score under a player name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitScoreRequest {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: SubmitScoreType,
    pub seq: u64,
    pub ts: u64,
    pub name: String,
    pub score: u64,
}

/// Ask for the best `limit` scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopScoresRequest {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: TopScoresType,
    pub seq: u64,
    pub ts: u64,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GmRequest {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: GmType,
    pub seq: u64,
    pub ts: u64,
}

// ============== Relay -> Game Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReceiptType {
    #[default]
    #[serde(rename = "receipt")]
    Receipt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorType {
    #[default]
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCode {
    /// No wallet is connected to the relay
    #[serde(rename = "wallet_unavailable")]
    WalletUnavailable,
    #[serde(rename = "wrong_network")]
    WrongNetwork,
    /// The user or the contract rejected the transaction
    #[serde(rename = "rejected")]
    Rejected,
    #[serde(rename = "invalid_request")]
    InvalidRequest,
    #[serde(rename = "internal")]
    Internal,
    /// Any code this client does not know yet
    #[serde(rename = "unknown")]
    Unknown,
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = std::borrow::Cow::<'de, str>::deserialize(deserializer)?;
        Ok(match s.as_ref() {
            "wallet_unavailable" => Self::WalletUnavailable,
            "wrong_network" => Self::WrongNetwork,
            "rejected" => Self::Rejected,
            "invalid_request" => Self::InvalidRequest,
            "internal" => Self::Internal,
            _ => Self::Unknown,
        })
    }
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::WalletUnavailable => "wallet_unavailable",
            ErrorCode::WrongNetwork => "wrong_network",
            ErrorCode::Rejected => "rejected",
            ErrorCode::InvalidRequest => "invalid_request",
            ErrorCode::Internal => "internal",
            ErrorCode::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transaction accepted by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: ReceiptType,
    pub seq: u64,
    pub ts: u64,
    pub tx_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player: String,
    #[serde(default)]
    pub name: String,
    pub score: u64,
}

impl From<ScoreEntry> for LeaderboardEntry {
    fn from(e: ScoreEntry) -> Self {
        LeaderboardEntry {
            player: e.player,
            name: e.name,
            score: e.score,
        }
    }
}

impl From<&LeaderboardEntry> for ScoreEntry {
    fn from(e: &LeaderboardEntry) -> Self {
        ScoreEntry {
            player: e.player.clone(),
            name: e.name.clone(),
            score: e.score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopScoresMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: TopScoresType,
    pub seq: u64,
    pub ts: u64,
    pub entries: Vec<ScoreEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

// ============== Message Parsing ==============

/// Parsed relay response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedResponse {
    Receipt(ReceiptMessage),
    TopScores(TopScoresMessage),
    Error(ErrorMessage),
    Unknown(UnknownMessage),
}

impl ParsedResponse {
    pub fn seq(&self) -> u64 {
        match self {
            ParsedResponse::Receipt(m) => m.seq,
            ParsedResponse::TopScores(m) => m.seq,
            ParsedResponse::Error(m) => m.seq,
            ParsedResponse::Unknown(m) => m.seq,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ParsedResponse::Receipt(_) => "receipt",
            ParsedResponse::TopScores(_) => "top_scores",
            ParsedResponse::Error(_) => "error",
            ParsedResponse::Unknown(_) => "unknown",
        }
    }
}

/// Parsed request, as seen by a relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRequest {
    SubmitScore(SubmitScoreRequest),
    TopScores(TopScoresRequest),
    Gm(GmRequest),
    Unknown(UnknownMessage),
}

impl ParsedRequest {
    pub fn seq(&self) -> u64 {
        match self {
            ParsedRequest::SubmitScore(m) => m.seq,
            ParsedRequest::TopScores(m) => m.seq,
            ParsedRequest::Gm(m) => m.seq,
            ParsedRequest::Unknown(m) => m.seq,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
}

/// Messages with an unrecognised `type` come back as `Unknown` instead of
/// failing; malformed known messages are errors.
fn parse_unknown(
    json: &str,
    known: &[&str],
    err: serde_json::Error,
) -> Result<UnknownMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    struct Header<'a> {
        #[serde(rename = "type")]
        #[serde(borrow)]
        msg_type: Option<&'a str>,
        seq: Option<u64>,
    }
    let header = serde_json::from_str::<Header>(json)?;
    let msg_type = header.msg_type.unwrap_or("unknown");
    if known.contains(&msg_type) {
        return Err(err);
    }
    Ok(UnknownMessage {
        seq: header.seq.unwrap_or(0),
    })
}

/// Parse one relay response line.
pub fn parse_response(json: &str) -> Result<ParsedResponse, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum Inbound {
        #[serde(rename = "receipt")]
        Receipt(ReceiptMessage),
        #[serde(rename = "top_scores")]
        TopScores(TopScoresMessage),
        #[serde(rename = "error")]
        Error(ErrorMessage),
    }

    match serde_json::from_str::<Inbound>(json) {
        Ok(Inbound::Receipt(m)) => Ok(ParsedResponse::Receipt(m)),
        Ok(Inbound::TopScores(m)) => Ok(ParsedResponse::TopScores(m)),
        Ok(Inbound::Error(m)) => Ok(ParsedResponse::Error(m)),
        Err(e) => parse_unknown(json, &["receipt", "top_scores", "error"], e)
            .map(ParsedResponse::Unknown),
    }
}

/// Parse one request line (relay side; used by test relays and tooling).
pub fn parse_request(json: &str) -> Result<ParsedRequest, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum Outbound {
        #[serde(rename = "submit_score")]
        SubmitScore(SubmitScoreRequest),
        #[serde(rename = "top_scores")]
        TopScores(TopScoresRequest),
        #[serde(rename = "gm")]
        Gm(GmRequest),
    }

    match serde_json::from_str::<Outbound>(json) {
        Ok(Outbound::SubmitScore(m)) => Ok(ParsedRequest::SubmitScore(m)),
        Ok(Outbound::TopScores(m)) => Ok(ParsedRequest::TopScores(m)),
        Ok(Outbound::Gm(m)) => Ok(ParsedRequest::Gm(m)),
        Err(e) => parse_unknown(json, &["submit_score", "top_scores", "gm"], e)
            .map(ParsedRequest::Unknown),
    }
}

// ============== Utility Functions ==============

pub fn create_submit_score(seq: u64, name: &str, score: u64) -> SubmitScoreRequest {
    SubmitScoreRequest {
        msg_type: SubmitScoreType::SubmitScore,
        seq,
        ts: current_timestamp_ms(),
        name: name.to_string(),
        score,
    }
}

pub fn create_top_scores(seq: u64, limit: u32) -> TopScoresRequest {
    TopScoresRequest {
        msg_type: TopScoresType::TopScores,
        seq,
        ts: current_timestamp_ms(),
        limit,
    }
}

pub fn create_gm(seq: u64) -> GmRequest {
    GmRequest {
        msg_type: GmType::Gm,
        seq,
        ts: current_timestamp_ms(),
    }
}

pub fn create_receipt(seq: u64, tx_hash: &str) -> ReceiptMessage {
    ReceiptMessage {
        msg_type: ReceiptType::Receipt,
        seq,
        ts: current_timestamp_ms(),
        tx_hash: tx_hash.to_string(),
    }
}

pub fn create_top_scores_response(seq: u64, entries: &[LeaderboardEntry]) -> TopScoresMessage {
    TopScoresMessage {
        msg_type: TopScoresType::TopScores,
        seq,
        ts: current_timestamp_ms(),
        entries: entries.iter().map(ScoreEntry::from).collect(),
    }
}

pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

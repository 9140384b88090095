use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::protocol::ErrorCode;

/// Failure talking to the chain (or to the relay standing in front of it).
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("chain submission is disabled")]
    Disabled,

    #[error("cannot reach relay at {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("relay did not answer within {0:?}")]
    Timeout(Duration),

    #[error("relay i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed relay message: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("relay closed the connection before answering")]
    Closed,

    #[error("{code}: {message}")]
    Relay { code: ErrorCode, message: String },

    #[error("relay sent an unexpected {0} message")]
    Unexpected(&'static str),
}

impl ChainError {
    pub fn relay(code: ErrorCode, message: impl Into<String>) -> Self {
        ChainError::Relay {
            code,
            message: message.into(),
        }
    }

    /// Relay-reported code, if the relay answered with an error.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ChainError::Relay { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Short, user-facing text for a status line.
    pub fn notice(&self) -> &'static str {
        match self {
            ChainError::Disabled => "chain is disabled",
            ChainError::Connect { .. } | ChainError::Closed => "relay unreachable",
            ChainError::Timeout(_) => "relay timed out",
            ChainError::Io(_) | ChainError::Decode(_) | ChainError::Unexpected(_) => "relay error",
            ChainError::Relay { code, .. } => match code {
                ErrorCode::WalletUnavailable => "connect a wallet first",
                ErrorCode::WrongNetwork => "wrong network",
                ErrorCode::Rejected => "transaction rejected",
                ErrorCode::InvalidRequest => "request refused",
                ErrorCode::Internal | ErrorCode::Unknown => "chain error",
            },
        }
    }
}

/// Why a finished game cannot be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("the game is still in progress")]
    GameActive,
    #[error("a zero score cannot be submitted")]
    ZeroScore,
    #[error("a player name is required")]
    EmptyName,
    #[error("player name is longer than {max} characters")]
    NameTooLong { max: usize },
}

//! Score submission guard.
//!
//! A submission is built from a snapshot, never from live engine state, so
//! the game can restart while the request is in flight.

use crate::core::{Board, GameSnapshot};
use crate::error::SubmissionError;
use crate::types::{Tile, MAX_NAME_LEN};

/// A final score that passed the submission rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSubmission {
    /// Trimmed player name.
    pub name: String,
    pub score: u64,
    pub episode_id: u32,
    pub best_tile: Tile,
    /// Board at the end of the game.
    pub board: Board,
}

impl ScoreSubmission {
    /// Validate and copy out what the chain needs.
    ///
    /// The game must be over with a non-zero score, and the trimmed name must
    /// be non-empty and at most [`MAX_NAME_LEN`] characters.
    pub fn prepare(snapshot: &GameSnapshot, name: &str) -> Result<Self, SubmissionError> {
        if !snapshot.status.is_over() {
            return Err(SubmissionError::GameActive);
        }
        if snapshot.score == 0 {
            return Err(SubmissionError::ZeroScore);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(SubmissionError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(SubmissionError::NameTooLong { max: MAX_NAME_LEN });
        }

        Ok(Self {
            name: name.to_string(),
            score: snapshot.score,
            episode_id: snapshot.episode_id,
            best_tile: snapshot.best_tile,
            board: snapshot.board.clone(),
        })
    }
}

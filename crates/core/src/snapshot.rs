use crate::board::Board;
use crate::types::{GameStatus, Tile};

/// Owned copy of everything a renderer or a score submission needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    pub board: Board,
    pub score: u64,
    pub status: GameStatus,
    pub episode_id: u32,
    pub moves: u32,
    pub best_tile: Tile,
    pub seed: u64,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.status.is_over()
    }
}

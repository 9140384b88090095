//! RNG module - tile spawning
//!
//! Spawns pick an empty cell uniformly and place a 2 (nine times in ten) or
//! a 4. The generator is seedable so a seed reproduces a whole game.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::types::{Tile, SPAWN_HIGH_IN_TEN, SPAWN_HIGH_VALUE, SPAWN_LOW_VALUE};

/// Seedable RNG used for spawns
#[derive(Debug, Clone)]
pub struct TileRng {
    rng: SmallRng,
    seed: u64,
}

impl TileRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from OS entropy. The chosen seed is kept so the game can be replayed.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `0..n`. `n` must be non-zero.
    pub fn pick(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }

    /// Draw a spawn value
    pub fn tile_value(&mut self) -> Tile {
        if self.rng.gen_range(0..10) < SPAWN_HIGH_IN_TEN {
            SPAWN_HIGH_VALUE
        } else {
            SPAWN_LOW_VALUE
        }
    }
}

impl Default for TileRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// A tile placed by [`spawn_tile`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpawnedTile {
    pub row: usize,
    pub col: usize,
    pub value: Tile,
}

/// Place a new tile in a random empty cell.
///
/// Returns `None` without touching the board when it is full.
pub fn spawn_tile(board: &mut Board, rng: &mut TileRng) -> Option<SpawnedTile> {
    let empty = board.empty_count();
    if empty == 0 {
        return None;
    }

    let nth = rng.pick(empty);
    let (row, col) = board.empty_cells().nth(nth)?;
    let value = rng.tile_value();
    board.set(row, col, value);
    Some(SpawnedTile { row, col, value })
}

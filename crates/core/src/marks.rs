//! Per-cell presentation marks, re-derived after the fact.
//!
//! The engine keeps no "new" or "merged" flags. A renderer that wants them
//! holds on to the previous board and the direction played, and this module
//! replays the move to recover which cells merged and which one spawned.

use crate::board::Board;
use crate::moves::apply_move_with;
use crate::types::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileMark {
    #[default]
    Empty,
    /// Tile that slid or stayed put
    Plain,
    /// Tile produced by a merge this turn
    Merged,
    /// Tile spawned after the move
    Spawned,
}

/// Marks for `current`, given the board before the move and its direction.
///
/// Returns row-major marks, one per cell. Boards of different sizes yield
/// plain marks for every non-empty cell of `current`.
pub fn derive_marks(previous: &Board, direction: Direction, current: &Board) -> Vec<TileMark> {
    let size = current.size();
    let mut marks: Vec<TileMark> = current
        .cells()
        .iter()
        .map(|&v| if v == 0 { TileMark::Empty } else { TileMark::Plain })
        .collect();

    if previous.size() != size {
        return marks;
    }

    let mut replayed = previous.clone();
    let mut merged = Vec::new();
    apply_move_with(&mut replayed, direction, |r, c| merged.push((r, c)));

    for (r, c) in merged {
        if current.get(r, c) == replayed.get(r, c) {
            marks[r * size + c] = TileMark::Merged;
        }
    }

    for (i, (&now, &expected)) in current.cells().iter().zip(replayed.cells()).enumerate() {
        if expected == 0 && now != 0 {
            marks[i] = TileMark::Spawned;
        }
    }

    marks
}

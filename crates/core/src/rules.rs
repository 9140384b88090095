//! Terminal-state rules.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::moves::apply_move;
use crate::types::{Direction, GameStatus, MAX_TILE};

/// True iff no cell is empty and no horizontally or vertically adjacent
/// cells hold equal mergeable values.
///
/// Only meaningful after a spawn: the spawn itself can fill the last gap.
pub fn is_game_over(board: &Board) -> bool {
    !can_move(board)
}

/// Equal-or-empty adjacency shortcut: some direction can still change the
/// board. Agrees with simulating all four directions.
pub fn can_move(board: &Board) -> bool {
    let size = board.size();
    let cells = board.cells();
    for r in 0..size {
        for c in 0..size {
            let v = cells[r * size + c];
            if v == 0 {
                return true;
            }
            if v == MAX_TILE {
                continue;
            }
            if c + 1 < size && cells[r * size + c + 1] == v {
                return true;
            }
            if r + 1 < size && cells[(r + 1) * size + c] == v {
                return true;
            }
        }
    }
    false
}

/// Whether a move in `direction` would change the board.
pub fn can_move_in(board: &Board, direction: Direction) -> bool {
    let mut probe = board.clone();
    apply_move(&mut probe, direction).changed
}

/// Directions that would change the board, in [`Direction::ALL`] order.
pub fn legal_moves(board: &Board) -> ArrayVec<Direction, 4> {
    Direction::ALL
        .into_iter()
        .filter(|&d| can_move_in(board, d))
        .collect()
}

pub fn status_of(board: &Board) -> GameStatus {
    if is_game_over(board) {
        GameStatus::Over
    } else {
        GameStatus::Active
    }
}

//! Slide and merge.
//!
//! Every direction reduces to the Left case on a line read in slide order:
//! compact, merge equal neighbours pairwise from the leading edge (a merged
//! tile never merges again in the same move), re-compact and zero-pad.
//! Tiles at [`MAX_TILE`] are the ceiling of the tile type and stay unmerged.
//! Right/Down read their lines reversed; Up/Down read columns. See
//! [`Board::read_line`].

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{Direction, Tile, MAX_BOARD_SIZE, MAX_TILE};

/// Line buffer sized for the largest supported board.
type LineBuf = ArrayVec<Tile, MAX_BOARD_SIZE>;

/// Result of moving a board without touching the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board: Board,
    /// Sum of all tiles produced by merges. Zero when `changed` is false.
    pub score_delta: u64,
    /// True iff any cell differs from the input board.
    pub changed: bool,
}

/// Result of an in-place move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveResult {
    pub score_delta: u64,
    pub changed: bool,
}

/// Slide one line toward index 0, returning the merge score.
///
/// ```
/// use tui_2048_core::slide_line;
///
/// let mut line = [2, 2, 4, 0];
/// assert_eq!(slide_line(&mut line), 4);
/// assert_eq!(line, [4, 4, 0, 0]);
/// ```
pub fn slide_line(line: &mut [Tile]) -> u64 {
    slide_line_with(line, |_| {})
}

/// Like [`slide_line`], calling `on_merge(k)` for every output slot `k`
/// that holds a merged tile.
pub fn slide_line_with(line: &mut [Tile], mut on_merge: impl FnMut(usize)) -> u64 {
    let mut write = 0usize;
    let mut score = 0u64;
    let mut pending: Option<Tile> = None;

    // `write` never overtakes `read`: every output slot consumes at least one
    // earlier input tile.
    for read in 0..line.len() {
        let value = line[read];
        if value == 0 {
            continue;
        }
        match pending {
            Some(p) if p == value && p < MAX_TILE => {
                let merged = p * 2;
                line[write] = merged;
                on_merge(write);
                score += u64::from(merged);
                write += 1;
                pending = None;
            }
            Some(p) => {
                line[write] = p;
                write += 1;
                pending = Some(value);
            }
            None => pending = Some(value),
        }
    }

    if let Some(p) = pending {
        line[write] = p;
        write += 1;
    }
    line[write..].fill(0);
    score
}

/// Move `board` in place.
pub fn apply_move(board: &mut Board, direction: Direction) -> MoveResult {
    apply_move_with(board, direction, |_, _| {})
}

/// Move `board` in place, reporting merged cells as board coordinates.
pub fn apply_move_with(
    board: &mut Board,
    direction: Direction,
    mut on_merge: impl FnMut(usize, usize),
) -> MoveResult {
    let size = board.size();
    let mut before = LineBuf::new();
    let mut line = LineBuf::new();
    for _ in 0..size {
        before.push(0);
        line.push(0);
    }

    let mut result = MoveResult::default();
    for index in 0..size {
        board.read_line(direction, index, &mut before);
        line.copy_from_slice(&before);

        let mut merged_at = ArrayVec::<usize, MAX_BOARD_SIZE>::new();
        result.score_delta += slide_line_with(&mut line, |k| merged_at.push(k));

        if line != before {
            result.changed = true;
            board.write_line(direction, index, &line);
        }
        for k in merged_at {
            let (r, c) = board.line_cell(direction, index, k);
            on_merge(r, c);
        }
    }

    debug_assert!(result.changed || result.score_delta == 0);
    result
}

/// Pure move: returns the moved board, the merge score and whether anything
/// changed.
///
/// ```
/// use tui_2048_core::{move_board, Board};
/// use tui_2048_types::Direction;
///
/// let board = Board::from_array([
///     [2, 2, 0, 0],
///     [0, 0, 0, 0],
///     [0, 0, 0, 0],
///     [0, 0, 0, 0],
/// ])
/// .unwrap();
/// let out = move_board(&board, Direction::Left);
/// assert_eq!(out.board.to_rows()[0], vec![4, 0, 0, 0]);
/// assert_eq!(out.score_delta, 4);
/// assert!(out.changed);
/// ```
pub fn move_board(board: &Board, direction: Direction) -> MoveOutcome {
    let mut next = board.clone();
    let MoveResult {
        score_delta,
        changed,
    } = apply_move(&mut next, direction);
    MoveOutcome {
        board: next,
        score_delta,
        changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slid(mut line: Vec<Tile>) -> (Vec<Tile>, u64) {
        let score = slide_line(&mut line);
        (line, score)
    }

    #[test]
    fn test_slide_compacts_without_merge() {
        assert_eq!(slid(vec![0, 2, 0, 4]), (vec![2, 4, 0, 0], 0));
        assert_eq!(slid(vec![0, 0, 0, 0]), (vec![0, 0, 0, 0], 0));
    }

    #[test]
    fn test_slide_merges_pairs_once() {
        assert_eq!(slid(vec![2, 2, 2, 2]), (vec![4, 4, 0, 0], 8));
        assert_eq!(slid(vec![2, 2, 2, 0]), (vec![4, 2, 0, 0], 4));
        assert_eq!(slid(vec![4, 4, 8, 0]), (vec![8, 8, 0, 0], 8));
        assert_eq!(slid(vec![0, 4, 0, 4]), (vec![8, 0, 0, 0], 8));
    }

    #[test]
    fn test_slide_reports_merge_slots() {
        let mut line = [2, 2, 8, 8];
        let mut slots = Vec::new();
        let score = slide_line_with(&mut line, |k| slots.push(k));
        assert_eq!(line, [4, 16, 0, 0]);
        assert_eq!(score, 20);
        assert_eq!(slots, vec![0, 1]);
    }

    #[test]
    fn test_move_right_reverses() {
        let board = Board::from_array([
            [2, 0, 2, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ])
        .unwrap();
        let out = move_board(&board, Direction::Right);
        assert_eq!(out.board.to_rows()[0], vec![0, 0, 0, 4]);
        assert_eq!(out.score_delta, 4);
        assert!(out.changed);
    }

    #[test]
    fn test_move_up_and_down_use_columns() {
        let board = Board::from_array([
            [2, 0, 0, 0],
            [2, 0, 0, 4],
            [0, 0, 0, 0],
            [4, 0, 0, 4],
        ])
        .unwrap();

        let up = move_board(&board, Direction::Up);
        assert_eq!(
            up.board,
            Board::from_array([
                [4, 0, 0, 8],
                [4, 0, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ])
            .unwrap()
        );
        assert_eq!(up.score_delta, 12);

        let down = move_board(&board, Direction::Down);
        assert_eq!(
            down.board,
            Board::from_array([
                [0, 0, 0, 0],
                [0, 0, 0, 0],
                [4, 0, 0, 0],
                [4, 0, 0, 8],
            ])
            .unwrap()
        );
        assert_eq!(down.score_delta, 12);
    }

    #[test]
    fn test_blocked_move_is_unchanged_and_unscored() {
        let board = Board::from_array([
            [2, 4, 0, 0],
            [8, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ])
        .unwrap();
        let out = move_board(&board, Direction::Left);
        assert!(!out.changed);
        assert_eq!(out.score_delta, 0);
        assert_eq!(out.board, board);
    }

    #[test]
    fn test_largest_tiles_do_not_merge() {
        let board = Board::from_array([[MAX_TILE, MAX_TILE], [0, 0]]).unwrap();
        let out = move_board(&board, Direction::Left);
        assert!(!out.changed);
        assert_eq!(out.score_delta, 0);
        assert_eq!(out.board, board);

        // One step below the ceiling still merges, into the ceiling.
        let half = MAX_TILE / 2;
        let board = Board::from_array([[half, half], [0, 0]]).unwrap();
        let out = move_board(&board, Direction::Right);
        assert!(out.changed);
        assert_eq!(out.board.to_rows()[0], vec![0, MAX_TILE]);
        assert_eq!(out.score_delta, u64::from(MAX_TILE));
    }

    #[test]
    fn test_apply_move_with_reports_board_coordinates() {
        let mut board = Board::from_array([
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 2, 2],
            [0, 0, 0, 0],
        ])
        .unwrap();
        let mut merged = Vec::new();
        let res = apply_move_with(&mut board, Direction::Right, |r, c| merged.push((r, c)));
        assert!(res.changed);
        assert_eq!(merged, vec![(2, 3)]);
        assert_eq!(board.get(2, 3), Some(4));
    }
}

//! Game state module - owns one game session
//!
//! Ties together the board, the spawn RNG and the score. Each call to
//! [`GameState::apply_move`] is one engine turn: move, conditional spawn,
//! terminal check. The caller owns the state and passes it around; nothing
//! here is global, so any number of sessions can run side by side.

use tracing::debug;

use crate::board::Board;
use crate::moves::apply_move;
use crate::rng::{spawn_tile, SpawnedTile, TileRng};
use crate::rules::{is_game_over, status_of};
use crate::snapshot::GameSnapshot;
use crate::types::{Direction, GameAction, GameStatus, Tile, INITIAL_TILES};

/// What one turn did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The game is over; moves are not accepted.
    Rejected,
    /// Nothing slid or merged. No spawn, no score.
    Unchanged,
    Moved {
        score_delta: u64,
        spawned: Option<SpawnedTile>,
        /// True when this turn ended the game
        game_over: bool,
    },
}

impl TurnOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, TurnOutcome::Moved { .. })
    }

    pub fn score_delta(&self) -> u64 {
        match self {
            TurnOutcome::Moved { score_delta, .. } => *score_delta,
            _ => 0,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    score: u64,
    status: GameStatus,
    rng: TileRng,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Changed moves in the current episode.
    moves: u32,
}

impl GameState {
    /// Start a new game: empty `size` x `size` board plus the initial spawns.
    pub fn new(size: usize, seed: u64) -> Self {
        Self::with_rng(size, TileRng::new(seed))
    }

    /// New game seeded from OS entropy.
    pub fn from_entropy(size: usize) -> Self {
        Self::with_rng(size, TileRng::from_entropy())
    }

    fn with_rng(size: usize, rng: TileRng) -> Self {
        let mut state = Self {
            board: Board::new(size),
            score: 0,
            status: GameStatus::Active,
            rng,
            episode_id: 0,
            moves: 0,
        };
        state.deal();
        state
    }

    /// Resume from an existing position. Status is derived from the board.
    pub fn with_board(board: Board, score: u64, seed: u64) -> Self {
        let status = status_of(&board);
        Self {
            board,
            score,
            status,
            rng: TileRng::new(seed),
            episode_id: 0,
            moves: 0,
        }
    }

    /// Clear the board and place the opening tiles.
    fn deal(&mut self) {
        self.board.clear();
        self.score = 0;
        self.moves = 0;
        for _ in 0..INITIAL_TILES {
            spawn_tile(&mut self.board, &mut self.rng);
        }
        self.status = status_of(&self.board);
        debug!(
            episode = self.episode_id,
            size = self.board.size(),
            seed = self.rng.seed(),
            "new game"
        );
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn best_tile(&self) -> Tile {
        self.board.max_tile()
    }

    /// Play one turn in `direction`.
    pub fn apply_move(&mut self, direction: Direction) -> TurnOutcome {
        if self.status.is_over() {
            return TurnOutcome::Rejected;
        }

        let result = apply_move(&mut self.board, direction);
        if !result.changed {
            return TurnOutcome::Unchanged;
        }

        self.score += result.score_delta;
        self.moves = self.moves.wrapping_add(1);
        let spawned = spawn_tile(&mut self.board, &mut self.rng);

        // Checked only after the spawn: it may fill the last empty cell.
        let game_over = is_game_over(&self.board);
        if game_over {
            self.status = GameStatus::Over;
            debug!(
                episode = self.episode_id,
                score = self.score,
                best = self.board.max_tile(),
                moves = self.moves,
                "game over"
            );
        }

        TurnOutcome::Moved {
            score_delta: result.score_delta,
            spawned,
            game_over,
        }
    }

    /// Apply an engine action. Returns true if the state changed.
    ///
    /// Submission, leaderboard and GM actions are front-end concerns and
    /// leave the state untouched.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Move(direction) => self.apply_move(direction).changed(),
            GameAction::Restart => {
                self.restart();
                true
            }
            GameAction::SubmitScore | GameAction::ToggleLeaderboard | GameAction::Gm => false,
        }
    }

    /// Start the next episode on a board of the same size. The RNG stream
    /// continues, so a seeded session stays reproducible across restarts.
    pub fn restart(&mut self) {
        self.episode_id = self.episode_id.wrapping_add(1);
        self.deal();
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board.clone_from(&self.board);
        out.score = self.score;
        out.status = self.status;
        out.episode_id = self.episode_id;
        out.moves = self.moves;
        out.best_tile = self.board.max_tile();
        out.seed = self.rng.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_BOARD_SIZE, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dead_board() -> Board {
        Board::from_array([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ])
        .unwrap()
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(4, 12345);
        assert_eq!(state.score(), 0);
        assert_eq!(state.status(), GameStatus::Active);
        assert_eq!(state.episode_id(), 0);
        assert_eq!(state.moves(), 0);
        assert_eq!(state.board().tile_count(), 2);
        assert!(state
            .board()
            .cells()
            .iter()
            .all(|&v| v == 0 || v == 2 || v == 4));
    }

    #[test]
    fn test_undersized_game_still_deals_two_tiles() {
        let state = GameState::new(1, 4);
        assert_eq!(state.size(), crate::types::MIN_BOARD_SIZE);
        assert_eq!(state.board().tile_count(), 2);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = GameState::new(4, 42);
        let mut b = GameState::new(4, 42);
        assert_eq!(a.board(), b.board());
        for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
            assert_eq!(a.apply_move(dir), b.apply_move(dir));
            assert_eq!(a.board(), b.board());
        }
    }

    #[test]
    fn test_changed_move_scores_and_spawns() {
        let board = Board::from_array([
            [2, 2, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ])
        .unwrap();
        let mut state = GameState::with_board(board, 0, 1);

        let outcome = state.apply_move(Direction::Left);
        match outcome {
            TurnOutcome::Moved {
                score_delta,
                spawned,
                game_over,
            } => {
                assert_eq!(score_delta, 4);
                assert!(spawned.is_some());
                assert!(!game_over);
            }
            other => panic!("expected a move, got {other:?}"),
        }
        assert_eq!(state.score(), 4);
        assert_eq!(state.moves(), 1);
        assert_eq!(state.board().tile_count(), 2);
        assert_eq!(state.board().get(0, 0), Some(4));
    }

    #[test]
    fn test_unchanged_move_neither_spawns_nor_scores() {
        let board = Board::from_array([
            [2, 4, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ])
        .unwrap();
        let mut state = GameState::with_board(board.clone(), 10, 1);
        assert_eq!(state.apply_move(Direction::Left), TurnOutcome::Unchanged);
        assert_eq!(state.board(), &board);
        assert_eq!(state.score(), 10);
        assert_eq!(state.moves(), 0);
    }

    #[test]
    fn test_merged_tile_does_not_merge_twice() {
        // Left merges the two 8s into a 16 that must not swallow the next 16.
        let board = Board::from_array([
            [8, 8, 16, 32],
            [64, 128, 256, 512],
            [1024, 2048, 4096, 8192],
            [16, 32, 64, 128],
        ])
        .unwrap();
        let mut state = GameState::with_board(board, 0, 5);
        let outcome = state.apply_move(Direction::Left);
        assert_eq!(outcome.score_delta(), 16);
        assert_eq!(&state.board().to_rows()[0][..3], &[16, 16, 32]);
        assert!(state.board().is_full());
        // The two 16s can still merge next turn.
        assert!(!state.is_over());
    }

    #[test]
    fn test_game_over_detection() {
        // One move left: Right merges 4,4 in the last row; the spawn goes to
        // (3,0) and must be checked against (2,0)=2 and (3,1)=2.
        let board = Board::from_array([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [8, 16, 8, 16],
            [32, 64, 4, 4],
        ])
        .unwrap();
        let mut state = GameState::with_board(board, 0, 11);
        let outcome = state.apply_move(Direction::Right);
        assert!(outcome.changed());
        // Row 3 becomes [x, 32, 64, 8]; (3,0) neighbours are 8 above and 32 right,
        // so any spawn value (2 or 4) leaves no move.
        assert!(state.is_over());
        assert!(matches!(outcome, TurnOutcome::Moved { game_over: true, .. }));
        assert!(!state.snapshot().playable());
    }

    #[test]
    fn test_moves_rejected_when_over() {
        let mut state = GameState::with_board(dead_board(), 300, 1);
        assert!(state.is_over());
        for dir in Direction::ALL {
            assert_eq!(state.apply_move(dir), TurnOutcome::Rejected);
        }
        assert_eq!(state.score(), 300);
    }

    #[test]
    fn test_restart_resets_and_increments_episode() {
        let mut state = GameState::with_board(dead_board(), 300, 1);
        assert!(state.apply_action(GameAction::Restart));
        assert_eq!(state.episode_id(), 1);
        assert_eq!(state.score(), 0);
        assert_eq!(state.status(), GameStatus::Active);
        assert_eq!(state.board().tile_count(), 2);
    }

    #[test]
    fn test_front_end_actions_do_not_touch_state() {
        let mut state = GameState::new(4, 9);
        let before = state.snapshot();
        assert!(!state.apply_action(GameAction::SubmitScore));
        assert!(!state.apply_action(GameAction::ToggleLeaderboard));
        assert!(!state.apply_action(GameAction::Gm));
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_snapshot_of_finished_game() {
        let over = GameState::with_board(dead_board(), 120, 9);
        let snap = over.snapshot();
        assert_eq!(snap.score, 120);
        assert_eq!(snap.board, dead_board());
        assert_eq!(snap.best_tile, 4);
        assert!(!snap.playable());
    }

    #[test]
    fn test_snapshot_copies_state() {
        let state = GameState::new(3, 77);
        let snap = state.snapshot();
        assert_eq!(&snap.board, state.board());
        assert_eq!(snap.seed, 77);
        assert!(snap.playable());
    }
}

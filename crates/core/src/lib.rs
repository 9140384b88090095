//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the 2048 rules and the state of one game session.
//! It has **no dependencies** on the terminal, the network or the chain relay:
//!
//! - **Deterministic**: same seed, same spawns, same game
//! - **Explicit state**: callers own a [`GameState`]; there is no global board
//! - **Portable**: runs headless, in tests, or behind any front-end
//!
//! # Module Structure
//!
//! - [`board`]: N x N grid with line read/write helpers
//! - [`moves`]: slide and merge for the four directions
//! - [`rules`]: game-over and legal-move checks
//! - [`rng`]: seedable spawner (2 with p = 0.9, 4 with p = 0.1)
//! - [`game_state`]: one session: board, score, status, turns
//! - [`snapshot`]: detached copies for rendering and score submission
//! - [`marks`]: merged/spawned flags re-derived by replaying a move
//!
//! # Example
//!
//! ```
//! use tui_2048_core::{GameState, TurnOutcome};
//! use tui_2048_types::{Direction, GameStatus};
//!
//! let mut game = GameState::new(4, 12345);
//! assert_eq!(game.board().tile_count(), 2);
//!
//! match game.apply_move(Direction::Left) {
//!     TurnOutcome::Moved { score_delta, .. } => assert!(game.score() >= score_delta),
//!     TurnOutcome::Unchanged => assert_eq!(game.score(), 0),
//!     TurnOutcome::Rejected => unreachable!("fresh games are active"),
//! }
//! assert_eq!(game.status(), GameStatus::Active);
//! ```

pub mod board;
pub mod game_state;
pub mod marks;
pub mod moves;
pub mod rng;
pub mod rules;
pub mod snapshot;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardError};
pub use game_state::{GameState, TurnOutcome};
pub use marks::{derive_marks, TileMark};
pub use moves::{apply_move, move_board, slide_line, MoveOutcome, MoveResult};
pub use rng::{spawn_tile, SpawnedTile, TileRng};
pub use rules::{can_move, can_move_in, is_game_over, legal_moves, status_of};
pub use snapshot::GameSnapshot;

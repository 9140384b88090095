//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine, terminal rendering, chain relay protocol).
//!
//! # Board Dimensions
//!
//! The classic game is played on a 4x4 grid. Other square sizes are allowed
//! within [`MIN_BOARD_SIZE`]..=[`MAX_BOARD_SIZE`].
//!
//! # Spawning
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_TILES` | 2 | Tiles placed on a fresh board |
//! | `SPAWN_LOW_VALUE` | 2 | Common spawn value |
//! | `SPAWN_HIGH_VALUE` | 4 | Rare spawn value |
//! | `SPAWN_HIGH_IN_TEN` | 1 | Rare spawns per ten draws (p = 0.1) |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameAction, GameStatus};
//!
//! assert_eq!(Direction::from_str("left"), Some(Direction::Left));
//! assert_eq!(Direction::Up.as_str(), "up");
//!
//! let action = GameAction::from_str("moveDown").unwrap();
//! assert_eq!(action, GameAction::Move(Direction::Down));
//!
//! assert!(GameStatus::Over.is_over());
//! ```

/// Default (classic) board dimension.
pub const DEFAULT_BOARD_SIZE: usize = 4;

/// Smallest supported board dimension.
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest supported board dimension.
pub const MAX_BOARD_SIZE: usize = 8;

/// Tiles spawned when a new game starts.
pub const INITIAL_TILES: usize = 2;

/// Value of the common spawn.
pub const SPAWN_LOW_VALUE: Tile = 2;

/// Value of the rare spawn.
pub const SPAWN_HIGH_VALUE: Tile = 4;

/// Out of ten spawns, how many are the rare value.
pub const SPAWN_HIGH_IN_TEN: u32 = 1;

/// Tile value shown as a win badge. Reaching it does not end the game.
pub const WIN_TILE: Tile = 2048;

/// Largest tile a `Tile` can hold. Two of these never merge.
pub const MAX_TILE: Tile = 1 << (Tile::BITS - 1);

/// Maximum player name length (in chars) accepted for score submission.
pub const MAX_NAME_LEN: usize = 32;

/// Default number of leaderboard rows requested from the relay.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Frame pacing for the terminal loop in milliseconds.
pub const TICK_MS: u32 = 50;

/// A cell value. 0 is empty, anything else is a power of two.
pub type Tile = u32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_defaults() {
        assert_eq!(DEFAULT_BOARD_SIZE, 4);
        assert_eq!(INITIAL_TILES, 2);
        assert_eq!(SPAWN_LOW_VALUE, 2);
        assert_eq!(SPAWN_HIGH_VALUE, 4);
        assert_eq!(SPAWN_HIGH_IN_TEN, 1);
        assert!((MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&DEFAULT_BOARD_SIZE));
    }

    #[test]
    fn direction_parse_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_str(dir.as_str()), Some(dir));
        }
        assert_eq!(Direction::from_str("U"), Some(Direction::Up));
        assert_eq!(Direction::from_str("sideways"), None);
    }

    #[test]
    fn action_parse_accepts_move_prefix() {
        assert_eq!(
            GameAction::from_str("moveLeft"),
            Some(GameAction::Move(Direction::Left))
        );
        assert_eq!(
            GameAction::from_str("right"),
            Some(GameAction::Move(Direction::Right))
        );
        assert_eq!(GameAction::from_str("restart"), Some(GameAction::Restart));
        assert_eq!(GameAction::from_str("gm"), Some(GameAction::Gm));
        assert_eq!(GameAction::from_str("jump"), None);
    }
}

/// The four slide directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in a stable order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse direction from string (case-insensitive)
    ///
    /// Accepts full names or single letters: "up" | "u", "down" | "d",
    /// "left" | "l", "right" | "r".
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("Down"), Some(Direction::Down));
    /// assert_eq!(Direction::from_str("r"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("north"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// True for Up/Down, which slide along columns.
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// True when tiles travel toward the high index (Right, Down).
    pub fn is_reversed(&self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

/// Derived game status.
///
/// - **Active**: at least one move can still change the board
/// - **Over**: the board is full and no neighbours share a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Active,
    Over,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Over)
    }
}

/// Actions produced by input and consumed by the game loop.
///
/// Only `Move` and `Restart` touch the engine; the rest drive the
/// score-submission and leaderboard front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Slide all tiles in a direction
    Move(Direction),
    /// Start a new game
    Restart,
    /// Open the submission prompt (only meaningful when the game is over)
    SubmitScore,
    /// Show or hide the on-chain leaderboard
    ToggleLeaderboard,
    /// Send the relay's "gm" greeting call
    Gm,
}

impl GameAction {
    /// Parse action from string
    ///
    /// Directions may be given bare ("left") or camelCase-prefixed ("moveLeft").
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        let bare = lower.strip_prefix("move").unwrap_or(&lower);
        if let Some(dir) = Direction::from_str(bare) {
            if bare.len() > 1 {
                return Some(GameAction::Move(dir));
            }
        }
        match lower.as_str() {
            "restart" => Some(GameAction::Restart),
            "submitscore" | "submit" => Some(GameAction::SubmitScore),
            "leaderboard" => Some(GameAction::ToggleLeaderboard),
            "gm" => Some(GameAction::Gm),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(Direction::Up) => "moveUp",
            GameAction::Move(Direction::Down) => "moveDown",
            GameAction::Move(Direction::Left) => "moveLeft",
            GameAction::Move(Direction::Right) => "moveRight",
            GameAction::Restart => "restart",
            GameAction::SubmitScore => "submitScore",
            GameAction::ToggleLeaderboard => "leaderboard",
            GameAction::Gm => "gm",
        }
    }
}

/// One leaderboard row as reported by the chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeaderboardEntry {
    /// Submitting account (address string as reported by the relay)
    pub player: String,
    /// Player-chosen display name; may be empty on-chain
    pub name: String,
    pub score: u64,
}

impl LeaderboardEntry {
    /// Name to display, falling back to "(unknown)" for blank names.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "(unknown)"
        } else {
            &self.name
        }
    }
}

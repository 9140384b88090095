//! Terminal input module.
//!
//! Independent of any UI framework. It maps `crossterm` key events into
//! [`crate::types::GameAction`], recognizes mouse swipes as moves, and
//! edits the player name shown in the submission prompt.

pub mod map;
pub mod name;
pub mod swipe;

pub use tui_2048_types as types;

pub use map::{handle_key_event, should_quit};
pub use name::{NameEvent, NameInput};
pub use swipe::SwipeTracker;

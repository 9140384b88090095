//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It skips widget
//! toolkits and renders into a framebuffer that is flushed to the terminal
//! as a diff against the previous frame.
//!
//! - `core` stays deterministic and testable; views only read snapshots
//! - [`GameView::fit`] scales tiles down for small terminals

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_colors, AnchorY, ChainStatusView, GameView, HudView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};

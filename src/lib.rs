//! Terminal 2048 (workspace facade crate).
//!
//! The engine, input, rendering and chain layers live in dedicated crates
//! under `crates/`; this package re-exports them as
//! `tui_2048::{core,adapter,term,input,types}` and adds the front-end
//! controller ([`app`]) and command line ([`cli`]) used by the binary.

pub use tui_2048_adapter as adapter;
pub use tui_2048_core as core;
pub use tui_2048_input as input;
pub use tui_2048_term as term;
pub use tui_2048_types as types;

pub mod app;
pub mod cli;

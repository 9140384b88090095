//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::app::AppConfig;
use crate::types::{DEFAULT_BOARD_SIZE, DEFAULT_LEADERBOARD_LIMIT, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

#[derive(Parser, Debug, Clone)]
#[command(name = "tui-2048", version, about = "Terminal 2048 with on-chain high scores")]
pub struct Args {
    /// Board dimension (N x N).
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE, value_parser = parse_size)]
    pub size: usize,
    /// Seed for tile spawns; random when omitted.
    #[arg(long, env = "G2048_SEED")]
    pub seed: Option<u64>,
    /// Keep scores in memory instead of talking to the relay.
    #[arg(long)]
    pub offline: bool,
    /// Keep the finished board on screen after a successful submission.
    #[arg(long)]
    pub keep_after_submit: bool,
    /// Rows fetched for the leaderboard overlay.
    #[arg(long, default_value_t = DEFAULT_LEADERBOARD_LIMIT as u32,
          value_parser = clap::value_parser!(u32).range(1..=100))]
    pub leaderboard_limit: u32,
    /// Tracing filter, e.g. "info", "tui_2048_adapter=debug".
    #[arg(long, env = "G2048_LOG", default_value = "info")]
    pub log: String,
    /// Write logs to this file. The terminal is taken by the game, so
    /// nothing is logged without it.
    #[arg(long, env = "G2048_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn app_config(&self, chain_enabled: bool) -> AppConfig {
        AppConfig {
            chain_enabled,
            reset_after_submit: !self.keep_after_submit,
            leaderboard_limit: self.leaderboard_limit,
        }
    }
}

fn parse_size(s: &str) -> Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("`{s}` is not a number"))?;
    if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&n) {
        Ok(n)
    } else {
        Err(format!(
            "board size must be between {MIN_BOARD_SIZE} and {MAX_BOARD_SIZE}"
        ))
    }
}

//! Front-end controller.
//!
//! Owns one [`GameState`] and everything the terminal front-end layers on
//! top of it: tile marks, the name prompt, the leaderboard overlay, status
//! notices and the chain request bookkeeping. It performs no I/O; chain work
//! leaves as [`ChainRequest`] values and comes back as [`ChainEvent`]s, so
//! the whole flow is testable without a terminal or a relay.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use tracing::{debug, info};

use crate::adapter::{ChainEvent, ChainRequest, RequestKind, ScoreSubmission};
use crate::core::{derive_marks, GameSnapshot, GameState, TileMark, TurnOutcome};
use crate::input::{handle_key_event, should_quit, NameEvent, NameInput, SwipeTracker};
use crate::term::{ChainStatusView, HudView};
use crate::types::{Direction, GameAction, LeaderboardEntry, DEFAULT_LEADERBOARD_LIMIT};

/// Front-end policy knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    /// Whether a chain bridge is running.
    pub chain_enabled: bool,
    /// Start a new game once a score is on chain.
    pub reset_after_submit: bool,
    pub leaderboard_limit: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chain_enabled: true,
            reset_after_submit: true,
            leaderboard_limit: DEFAULT_LEADERBOARD_LIMIT as u32,
        }
    }
}

pub struct App {
    game: GameState,
    config: AppConfig,
    best_score: u64,
    marks: Vec<TileMark>,
    swipe: SwipeTracker,
    prompt: Option<NameInput>,
    last_name: String,
    notice: Option<String>,
    leaderboard: Option<Vec<LeaderboardEntry>>,
    leaderboard_open: bool,
    /// Episode whose score is already on chain.
    submitted_episode: Option<u32>,
    /// Episode whose submission is in flight.
    submitting_episode: Option<u32>,
    pending: usize,
    quit: bool,
}

impl App {
    pub fn new(game: GameState, config: AppConfig) -> Self {
        Self {
            best_score: game.score(),
            game,
            config,
            marks: Vec::new(),
            swipe: SwipeTracker::new(),
            prompt: None,
            last_name: String::new(),
            notice: None,
            leaderboard: None,
            leaderboard_open: false,
            submitted_episode: None,
            submitting_episode: None,
            pending: 0,
            quit: false,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_prompting(&self) -> bool {
        self.prompt.is_some()
    }

    pub fn leaderboard(&self) -> Option<&[LeaderboardEntry]> {
        if self.leaderboard_open {
            self.leaderboard.as_deref()
        } else {
            None
        }
    }

    pub fn pending_requests(&self) -> usize {
        self.pending
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
    }

    /// HUD state for the renderer.
    pub fn hud(&self) -> HudView<'_> {
        HudView {
            best_score: self.best_score,
            marks: (!self.marks.is_empty()).then_some(self.marks.as_slice()),
            prompt: self.prompt.as_ref().map(NameInput::as_str),
            notice: self.notice.as_deref(),
            leaderboard: self.leaderboard(),
            chain: self.chain_status(),
        }
    }

    fn chain_status(&self) -> ChainStatusView {
        if !self.config.chain_enabled {
            ChainStatusView::Offline
        } else if self.pending > 0 {
            ChainStatusView::Busy
        } else {
            ChainStatusView::Ready
        }
    }

    fn set_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(text.into());
    }

    /// Route a key press. Returns a chain request when the key asks for one.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ChainRequest> {
        // Ctrl-C quits even while the prompt owns the keyboard.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return None;
        }
        if self.prompt.is_some() {
            return self.handle_prompt_key(key);
        }
        if should_quit(key) {
            self.quit = true;
            return None;
        }
        handle_key_event(key).and_then(|action| self.handle_action(action))
    }

    /// Route a mouse event; completed swipes become moves.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> Option<ChainRequest> {
        if self.prompt.is_some() {
            return None;
        }
        let direction = self.swipe.handle_mouse(event)?;
        self.handle_action(GameAction::Move(direction))
    }

    /// Forget any half-finished swipe (terminal resized).
    pub fn cancel_swipe(&mut self) {
        self.swipe.reset();
    }

    pub fn handle_action(&mut self, action: GameAction) -> Option<ChainRequest> {
        match action {
            GameAction::Move(direction) => {
                self.play(direction);
                None
            }
            GameAction::Restart => {
                self.new_game();
                None
            }
            GameAction::SubmitScore => {
                self.open_prompt();
                None
            }
            GameAction::ToggleLeaderboard => self.toggle_leaderboard(),
            GameAction::Gm => {
                if !self.config.chain_enabled {
                    self.set_notice("chain is offline");
                    return None;
                }
                self.set_notice("sending gm...");
                self.issue(ChainRequest::Gm)
            }
        }
    }

    fn play(&mut self, direction: Direction) {
        let previous = self.game.board().clone();
        match self.game.apply_move(direction) {
            TurnOutcome::Moved { game_over, .. } => {
                self.marks = derive_marks(&previous, direction, self.game.board());
                self.best_score = self.best_score.max(self.game.score());
                self.leaderboard_open = false;
                if game_over {
                    let hint = if self.can_submit_current() {
                        "game over: enter to submit, r for a new game"
                    } else {
                        "game over: r for a new game"
                    };
                    self.set_notice(hint);
                } else {
                    self.notice = None;
                }
            }
            TurnOutcome::Unchanged => {}
            TurnOutcome::Rejected => {
                self.set_notice("game over: r for a new game");
            }
        }
    }

    fn new_game(&mut self) {
        self.game.restart();
        self.marks.clear();
        self.notice = None;
        self.leaderboard_open = false;
    }

    fn can_submit_current(&self) -> bool {
        let episode = Some(self.game.episode_id());
        self.config.chain_enabled
            && self.game.score() > 0
            && self.submitted_episode != episode
            && self.submitting_episode != episode
    }

    fn open_prompt(&mut self) {
        if !self.config.chain_enabled {
            self.set_notice("chain is offline");
        } else if !self.game.is_over() {
            self.set_notice("finish the game to submit");
        } else if self.game.score() == 0 {
            self.set_notice("nothing to submit");
        } else if self.submitted_episode == Some(self.game.episode_id()) {
            self.set_notice("score already submitted");
        } else if self.submitting_episode == Some(self.game.episode_id()) {
            self.set_notice("score is being submitted");
        } else {
            self.leaderboard_open = false;
            self.prompt = Some(NameInput::with_value(&self.last_name));
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) -> Option<ChainRequest> {
        let input = self.prompt.as_mut()?;
        match input.handle_key(key) {
            NameEvent::Edited | NameEvent::Ignored => None,
            NameEvent::Cancel => {
                self.prompt = None;
                None
            }
            NameEvent::Submit => {
                let name = input.as_str().to_string();
                self.submit(&name)
            }
        }
    }

    fn submit(&mut self, name: &str) -> Option<ChainRequest> {
        match ScoreSubmission::prepare(&self.game.snapshot(), name) {
            Ok(submission) => {
                info!(score = submission.score, name = %submission.name, "submitting score");
                self.prompt = None;
                self.last_name = submission.name.clone();
                self.set_notice(format!("submitting {}...", submission.score));
                self.submitting_episode = Some(submission.episode_id);
                self.issue(ChainRequest::Submit(submission))
            }
            Err(e) => {
                debug!(error = %e, "submission refused");
                self.set_notice(e.to_string());
                None
            }
        }
    }

    fn toggle_leaderboard(&mut self) -> Option<ChainRequest> {
        if self.leaderboard_open {
            self.leaderboard_open = false;
            return None;
        }
        if !self.config.chain_enabled {
            self.set_notice("chain is offline");
            return None;
        }
        self.leaderboard_open = true;
        if self.leaderboard.is_none() {
            self.set_notice("loading leaderboard...");
        }
        self.issue(ChainRequest::TopScores {
            limit: self.config.leaderboard_limit,
        })
    }

    fn issue(&mut self, request: ChainRequest) -> Option<ChainRequest> {
        self.pending += 1;
        Some(request)
    }

    /// Apply a finished chain request. May ask for a follow-up request.
    pub fn handle_chain_event(&mut self, event: ChainEvent) -> Option<ChainRequest> {
        self.pending = self.pending.saturating_sub(1);
        match event {
            ChainEvent::Submitted {
                episode_id,
                score,
                receipt,
            } => {
                self.submitted_episode = Some(episode_id);
                if self.submitting_episode == Some(episode_id) {
                    self.submitting_episode = None;
                }
                self.set_notice(format!("score {score} saved ({})", short_hash(&receipt.tx_hash)));
                if self.config.reset_after_submit
                    && self.game.episode_id() == episode_id
                    && self.game.is_over()
                {
                    self.game.restart();
                    self.marks.clear();
                }
                // Cached rows are stale now.
                self.leaderboard = None;
                if self.leaderboard_open {
                    return self.issue(ChainRequest::TopScores {
                        limit: self.config.leaderboard_limit,
                    });
                }
                None
            }
            ChainEvent::Leaderboard(entries) => {
                if self.notice.as_deref() == Some("loading leaderboard...") {
                    self.notice = None;
                }
                self.leaderboard = Some(entries);
                None
            }
            ChainEvent::GmSent(receipt) => {
                self.set_notice(format!("gm ({})", short_hash(&receipt.tx_hash)));
                None
            }
            ChainEvent::Failed { kind, error } => {
                let what = match kind {
                    RequestKind::Submit => {
                        self.submitting_episode = None;
                        "submit"
                    }
                    RequestKind::TopScores => {
                        if self.leaderboard.is_none() {
                            self.leaderboard_open = false;
                        }
                        "leaderboard"
                    }
                    RequestKind::Gm => "gm",
                };
                self.set_notice(format!("{what} failed: {}", error.notice()));
                None
            }
        }
    }
}

/// `0x1234…abcd` form of a transaction hash.
fn short_hash(hash: &str) -> String {
    let chars: Vec<char> = hash.chars().collect();
    if chars.len() <= 12 {
        return hash.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}

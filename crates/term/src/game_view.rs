//! GameView: maps a [`GameSnapshot`] plus front-end HUD state into a
//! terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, TileMark};
use crate::fb::{digit_count, CellStyle, FrameBuffer, Rgb};
use crate::types::{LeaderboardEntry, Tile, WIN_TILE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Chain bridge state shown in the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainStatusView {
    #[default]
    Offline,
    Ready,
    Busy,
}

impl ChainStatusView {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainStatusView::Offline => "OFF",
            ChainStatusView::Ready => "READY",
            ChainStatusView::Busy => "BUSY",
        }
    }
}

/// Everything the front-end draws besides the board itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct HudView<'a> {
    pub best_score: u64,
    /// Row-major marks for the current board, if a move was just played.
    pub marks: Option<&'a [TileMark]>,
    /// Name being typed into the submission prompt.
    pub prompt: Option<&'a str>,
    /// One-line message under the board.
    pub notice: Option<&'a str>,
    /// Leaderboard rows, shown as an overlay while set.
    pub leaderboard: Option<&'a [LeaderboardEntry]>,
    pub chain: ChainStatusView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Tile sizes tried by [`GameView::fit`], largest first.
const TILE_PRESETS: [(u16, u16); 4] = [(7, 3), (6, 3), (6, 1), (4, 1)];

/// Side panel width reserved by [`GameView::fit`].
const PANEL_W: u16 = 18;

/// A lightweight terminal renderer for the 2048 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Tile width in terminal columns.
    tile_w: u16,
    /// Tile height in terminal rows.
    tile_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new(TILE_PRESETS[1].0, TILE_PRESETS[1].1)
    }
}

struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

const EMPTY_BG: Rgb = Rgb::new(205, 193, 180);
const GRID_BG: Rgb = Rgb::new(187, 173, 160);
const DARK_TEXT: Rgb = Rgb::new(119, 110, 101);
const LIGHT_TEXT: Rgb = Rgb::new(249, 246, 242);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

impl GameView {
    pub fn new(tile_w: u16, tile_h: u16) -> Self {
        Self {
            tile_w: tile_w.max(1),
            tile_h: tile_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    /// Largest preset whose board and side panel fit in `viewport`.
    pub fn fit(size: usize, viewport: Viewport) -> Self {
        for (w, h) in TILE_PRESETS {
            let view = Self::new(w, h);
            let (fw, fh) = view.frame_size(size);
            if fw.saturating_add(PANEL_W) <= viewport.width
                && fh.saturating_add(1) <= viewport.height
            {
                return view;
            }
        }
        let (w, h) = TILE_PRESETS[TILE_PRESETS.len() - 1];
        Self::new(w, h)
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn tile_size(&self) -> (u16, u16) {
        (self.tile_w, self.tile_h)
    }

    fn gap_y(&self) -> u16 {
        if self.tile_h > 1 {
            1
        } else {
            0
        }
    }

    /// Outer size of the bordered board for an `size` x `size` grid.
    pub fn frame_size(&self, size: usize) -> (u16, u16) {
        let n = size as u16;
        let inner_w = n * (self.tile_w + 1) + 1;
        let inner_h = n * (self.tile_h + self.gap_y()) + self.gap_y();
        (inner_w + 2, inner_h + 2)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: &HudView<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(LIGHT_TEXT, SCREEN_BG).into_cell(' '));

        let size = snap.board.size();
        let (frame_w, frame_h) = self.frame_size(size);
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w + PANEL_W) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h + 1) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        let grid = CellStyle::new(GRID_BG, GRID_BG);
        fb.fill_rect(frame.x + 1, frame.y + 1, frame.w - 2, frame.h - 2, ' ', grid);
        draw_border(fb, frame.x, frame.y, frame.w, frame.h, CellStyle::new(GRID_BG, SCREEN_BG));

        for row in 0..size {
            for col in 0..size {
                let value = snap.board.get(row, col).unwrap_or(0);
                let mark = hud
                    .marks
                    .and_then(|m| m.get(row * size + col).copied())
                    .unwrap_or(TileMark::Plain);
                self.draw_tile(fb, &frame, row as u16, col as u16, value, mark);
            }
        }

        self.draw_side_panel(fb, snap, hud, viewport, &frame);

        if let Some(notice) = hud.notice {
            let y = frame.y + frame.h;
            if y < viewport.height {
                let style = CellStyle::new(Rgb::new(240, 200, 120), SCREEN_BG);
                fb.put_str_centered(frame.x, y, frame.w, notice, style);
            }
        }

        // Overlays, most specific first.
        if let Some(name) = hud.prompt {
            draw_prompt(fb, &frame, snap.score, name);
        } else if let Some(entries) = hud.leaderboard {
            draw_leaderboard(fb, &frame, entries);
        } else if snap.status.is_over() {
            draw_game_over(fb, &frame);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        hud: &HudView<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        frame: &Frame,
        row: u16,
        col: u16,
        value: Tile,
        mark: TileMark,
    ) {
        let px = frame.x + 2 + col * (self.tile_w + 1);
        let py = frame.y + 1 + self.gap_y() + row * (self.tile_h + self.gap_y());

        if value == 0 {
            let style = CellStyle::new(DARK_TEXT, EMPTY_BG);
            fb.fill_rect(px, py, self.tile_w, self.tile_h, ' ', style);
            return;
        }

        let (bg, fg) = tile_colors(value);
        let mut style = CellStyle::new(fg, bg);
        match mark {
            TileMark::Merged => style = style.bold(),
            TileMark::Spawned => style = style.dim(),
            TileMark::Plain | TileMark::Empty => {}
        }
        fb.fill_rect(px, py, self.tile_w, self.tile_h, ' ', style);
        put_tile_value(fb, px, py + self.tile_h / 2, self.tile_w, u64::from(value), style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: &HudView<'_>,
        viewport: Viewport,
        frame: &Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        let dim = value.dim();

        let mut y = frame.y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("BEST", hud.best_score.max(snap.score)),
            ("MOVES", u64::from(snap.moves)),
            ("TILE", u64::from(snap.best_tile)),
        ] {
            fb.put_str(panel_x, y, name, label);
            let end = fb.put_u64(panel_x, y + 1, v, value);
            if name == "TILE" && snap.best_tile >= WIN_TILE {
                let win = CellStyle::new(Rgb::new(237, 194, 46), SCREEN_BG).bold();
                fb.put_str(end.saturating_add(1), y + 1, "WIN", win);
            }
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "CHAIN", label);
        fb.put_str(panel_x, y + 1, hud.chain.as_str(), value);
        y = y.saturating_add(3);

        for help in [
            "arrows/wasd move",
            "r  new game",
            "enter submit",
            "b  leaderboard",
            "g  gm",
            "q  quit",
        ] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, help, dim);
            y += 1;
        }
    }
}

/// Background and text colour for a tile value.
pub fn tile_colors(value: Tile) -> (Rgb, Rgb) {
    match value {
        0 => (EMPTY_BG, DARK_TEXT),
        2 => (Rgb::new(238, 228, 218), DARK_TEXT),
        4 => (Rgb::new(237, 224, 200), DARK_TEXT),
        8 => (Rgb::new(242, 177, 121), LIGHT_TEXT),
        16 => (Rgb::new(245, 149, 99), LIGHT_TEXT),
        32 => (Rgb::new(246, 124, 95), LIGHT_TEXT),
        64 => (Rgb::new(246, 94, 59), LIGHT_TEXT),
        128 => (Rgb::new(237, 207, 114), LIGHT_TEXT),
        256 => (Rgb::new(237, 204, 97), LIGHT_TEXT),
        512 => (Rgb::new(237, 200, 80), LIGHT_TEXT),
        1024 => (Rgb::new(237, 197, 63), LIGHT_TEXT),
        2048 => (Rgb::new(237, 194, 46), LIGHT_TEXT),
        _ => (Rgb::new(60, 58, 50), LIGHT_TEXT),
    }
}

/// Centre `value` in a `w`-wide slot, falling back to k/M suffixes.
fn put_tile_value(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, value: u64, style: CellStyle) {
    let (shown, suffix) = if digit_count(value) <= w {
        (value, None)
    } else if digit_count(value / 1024) < w {
        (value / 1024, Some('k'))
    } else {
        (value / (1024 * 1024), Some('M'))
    };
    let len = digit_count(shown) + u16::from(suffix.is_some());
    let start = x + w.saturating_sub(len) / 2;
    let end = fb.put_u64(start, y, shown, style);
    if let Some(s) = suffix {
        fb.put_char(end, y, s, style);
    }
}

/// Write at most `max` characters of `s`. Returns the next column.
fn put_str_max(fb: &mut FrameBuffer, x: u16, y: u16, s: &str, max: u16, style: CellStyle) -> u16 {
    let mut cx = x;
    for ch in s.chars().take(max as usize) {
        fb.put_char(cx, y, ch, style);
        cx = cx.saturating_add(1);
    }
    cx
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn overlay_style() -> CellStyle {
    CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(40, 36, 32))
}

/// Blank box of `rows` inner rows centred over the board.
fn draw_box(fb: &mut FrameBuffer, frame: &Frame, rows: u16) -> Frame {
    let w = frame.w.saturating_sub(2).max(4);
    let h = (rows + 2).min(frame.h);
    let b = Frame {
        x: frame.x + 1,
        y: frame.y + frame.h.saturating_sub(h) / 2,
        w,
        h,
    };
    fb.fill_rect(b.x, b.y, b.w, b.h, ' ', overlay_style());
    draw_border(fb, b.x, b.y, b.w, b.h, overlay_style());
    b
}

fn draw_game_over(fb: &mut FrameBuffer, frame: &Frame) {
    let b = draw_box(fb, frame, 2);
    fb.put_str_centered(b.x + 1, b.y + 1, b.w - 2, "GAME OVER", overlay_style().bold());
    if b.h >= 4 {
        fb.put_str_centered(
            b.x + 1,
            b.y + 2,
            b.w - 2,
            "enter submit  r new",
            overlay_style().dim(),
        );
    }
}

fn draw_prompt(fb: &mut FrameBuffer, frame: &Frame, score: u64, name: &str) {
    let style = overlay_style();
    let b = draw_box(fb, frame, 4);
    let inner_w = b.w.saturating_sub(2);
    let left = b.x + 1;

    let x = fb.put_str(left, b.y + 1, "SUBMIT ", style.bold());
    fb.put_u64(x, b.y + 1, score, style.bold());

    // Keep the cursor visible: show the tail of long names.
    let x = fb.put_str(left, b.y + 2, "name: ", style);
    let room = inner_w.saturating_sub(7) as usize;
    let skip = name.chars().count().saturating_sub(room);
    let mut cx = x;
    for ch in name.chars().skip(skip) {
        fb.put_char(cx, b.y + 2, ch, style);
        cx += 1;
    }
    fb.put_char(cx, b.y + 2, '_', style.bold());

    if b.h >= 6 {
        fb.put_str(left, b.y + 4, "enter ok  esc cancel", style.dim());
    }
}

fn draw_leaderboard(fb: &mut FrameBuffer, frame: &Frame, entries: &[LeaderboardEntry]) {
    let style = overlay_style();
    let rows = (entries.len() as u16).max(1) + 1;
    let b = draw_box(fb, frame, rows);
    let left = b.x + 1;
    let right = b.x + b.w - 1;
    fb.put_str_centered(left, b.y + 1, b.w - 2, "TOP SCORES", style.bold());

    if entries.is_empty() {
        fb.put_str_centered(left, b.y + 2, b.w - 2, "no scores yet", style.dim());
        return;
    }

    for (i, entry) in entries.iter().enumerate() {
        let y = b.y + 2 + i as u16;
        if y + 1 >= b.y + b.h {
            break;
        }
        // "#1 - name: score", name truncated to what is left of the row.
        let mut x = put_str_max(fb, left, y, "#", 1, style);
        x = fb.put_u64(x, y, i as u64 + 1, style);
        x = put_str_max(fb, x, y, " - ", 3, style);
        let score_w = digit_count(entry.score) + 2;
        let room = right.saturating_sub(x).saturating_sub(score_w);
        x = put_str_max(fb, x, y, entry.display_name(), room, style);
        x = put_str_max(fb, x, y, ": ", 2, style);
        fb.put_u64(x, y, entry.score, style.bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, GameState};

    fn snap_of(rows: [[Tile; 4]; 4]) -> GameSnapshot {
        let board = Board::from_array(rows).unwrap();
        GameState::with_board(board, 0, 1).snapshot()
    }

    fn contains(fb: &FrameBuffer, needle: &str) -> bool {
        (0..fb.height()).any(|y| fb.row_text(y).contains(needle))
    }

    #[test]
    fn test_fit_picks_smaller_tiles_for_small_viewports() {
        assert_eq!(GameView::fit(4, Viewport::new(120, 40)).tile_size(), (7, 3));
        assert_eq!(GameView::fit(4, Viewport::new(60, 14)).tile_size(), (6, 1));
        assert_eq!(GameView::fit(8, Viewport::new(10, 5)).tile_size(), (4, 1));
    }

    #[test]
    fn test_tile_values_are_centred() {
        let snap = snap_of([[2048, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let view = GameView::new(6, 1).with_anchor_y(AnchorY::Top);
        let fb = view.render(&snap, &HudView::default(), Viewport::new(60, 12));
        // Frame at x=(60-31-18)/2=5; tile 0 spans columns 7..13 on row 1.
        let row: Vec<char> = fb.row_text(1).chars().collect();
        let tile: String = row[7..13].iter().collect();
        assert_eq!(tile, " 2048 ");
    }

    #[test]
    fn test_large_values_use_suffix() {
        let mut fb = FrameBuffer::new(4, 1);
        put_tile_value(&mut fb, 0, 0, 4, 131072, CellStyle::default());
        assert_eq!(fb.row_text(0), "128k");
    }

    #[test]
    fn test_game_over_overlay() {
        let snap = snap_of([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(snap.status.is_over());
        let fb = GameView::default().render(&snap, &HudView::default(), Viewport::new(80, 24));
        assert!(contains(&fb, "GAME OVER"));
    }

    #[test]
    fn test_prompt_takes_precedence() {
        let snap = snap_of([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let hud = HudView {
            prompt: Some("neo"),
            ..HudView::default()
        };
        let fb = GameView::default().render(&snap, &hud, Viewport::new(80, 24));
        assert!(contains(&fb, "name: neo_"));
        assert!(!contains(&fb, "GAME OVER"));
    }

    #[test]
    fn test_side_panel_and_notice() {
        let snap = snap_of([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let hud = HudView {
            best_score: 512,
            notice: Some("saved"),
            chain: ChainStatusView::Ready,
            ..HudView::default()
        };
        let fb = GameView::default().render(&snap, &hud, Viewport::new(80, 30));
        assert!(contains(&fb, "SCORE"));
        assert!(contains(&fb, "512"));
        assert!(contains(&fb, "READY"));
        assert!(contains(&fb, "saved"));
    }

    #[test]
    fn test_win_badge_next_to_best_tile() {
        let hud = HudView::default();
        let below = snap_of([[1024, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let fb = GameView::default().render(&below, &hud, Viewport::new(80, 30));
        assert!(!contains(&fb, "1024 WIN"));

        let won = snap_of([[2048, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let fb = GameView::default().render(&won, &hud, Viewport::new(80, 30));
        assert!(contains(&fb, "2048 WIN"));
    }

    #[test]
    fn test_leaderboard_rows() {
        let snap = snap_of([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let entries = vec![
            LeaderboardEntry {
                player: "0xabc".into(),
                name: "ann".into(),
                score: 900,
            },
            LeaderboardEntry {
                player: "0xdef".into(),
                name: String::new(),
                score: 40,
            },
        ];
        let hud = HudView {
            leaderboard: Some(&entries),
            ..HudView::default()
        };
        let fb = GameView::default().render(&snap, &hud, Viewport::new(80, 30));
        assert!(contains(&fb, "TOP SCORES"));
        assert!(contains(&fb, "#1 - ann: 900"));
        assert!(contains(&fb, "#2 - (unknown): 40"));
    }
}

use tui_2048::core::{Board, GameState};
use tui_2048::term::{tile_colors, AnchorY, FrameBuffer, GameView, HudView, Viewport};

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(4, 1).snapshot();
    let view = GameView::new(6, 1).with_anchor_y(AnchorY::Top);

    // 4 tiles of 6 plus 5 gaps = 29 inner columns; 4 rows; plus border.
    let (w, h) = view.frame_size(4);
    assert_eq!((w, h), (31, 6));

    // Viewport exactly frame + panel so the frame starts at x = 0.
    let fb = view.render(&snap, &HudView::default(), Viewport::new(w + 18, h));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(w - 1, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, h - 1).unwrap().ch, '└');
    assert_eq!(fb.get(w - 1, h - 1).unwrap().ch, '┘');
}

#[test]
fn term_view_colours_tiles_by_value() {
    let board = Board::from_array([[0, 0], [0, 8]]).unwrap();
    let snap = GameState::with_board(board, 0, 1).snapshot();
    let view = GameView::new(4, 1).with_anchor_y(AnchorY::Top);
    let (w, h) = view.frame_size(2);
    let fb = view.render(&snap, &HudView::default(), Viewport::new(w + 18, h));

    // Tile (1,1) starts after border + gap + tile + gap, on the second row.
    let cell = fb.get(2 + 5, 2).unwrap();
    assert_eq!(cell.style.bg, tile_colors(8).0);
    let empty = fb.get(2, 1).unwrap();
    assert_eq!(empty.style.bg, tile_colors(0).0);
    assert!(fb.row_text(2).contains(" 8"));
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let board = Board::from_array([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
    let mut game = GameState::with_board(board, 1000, 1);
    game.apply_move(tui_2048::types::Direction::Left);
    let snap = game.snapshot();

    let fb = GameView::default().render(&snap, &HudView::default(), Viewport::new(80, 30));
    let all = screen_text(&fb);
    assert!(all.contains("SCORE"));
    assert!(all.contains("3048"));
    assert!(all.contains("2048"));
    assert!(all.contains("MOVES"));
    assert!(all.contains("CHAIN"));
}

#[test]
fn term_view_skips_panel_on_narrow_terminals() {
    let snap = GameState::new(4, 1).snapshot();
    let viewport = Viewport::new(34, 10);
    let fb = GameView::fit(4, viewport).render(&snap, &HudView::default(), viewport);
    assert!(!screen_text(&fb).contains("SCORE"));
}

#[test]
fn render_into_reuses_buffer_across_sizes() {
    let snap = GameState::new(5, 9).snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    view.render_into(&snap, &HudView::default(), Viewport::new(80, 30), &mut fb);
    assert_eq!((fb.width(), fb.height()), (80, 30));
    view.render_into(&snap, &HudView::default(), Viewport::new(40, 12), &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 12));
    assert_eq!(fb.cells().len(), 480);
}

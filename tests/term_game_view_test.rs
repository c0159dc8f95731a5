use blockfall::core::{color, ActiveSnapshot, GameSnapshot, GameState, Tetromino};
use blockfall::term::{FrameBuffer, GameView, Viewport};
use blockfall::types::PieceKind;

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // 10 cells x 2 columns + border => 22 wide, 20 rows + border => 22 tall
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameSnapshot::default();
    snap.board[19][0] = PieceKind::I.to_u8();

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin.
    let y0 = 1 + 19;
    for x in [1, 2] {
        let cell = fb.get(x, y0).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, color(PieceKind::I));
    }
    assert_ne!(fb.get(3, y0).unwrap().ch, '█');
}

#[test]
fn term_view_draws_active_piece_over_board() {
    let snap = GameSnapshot {
        active: Some(ActiveSnapshot::from(Tetromino::new(PieceKind::O))),
        ..GameSnapshot::default()
    };

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // O at anchor (3, 0) covers columns 3..=4, rows 0..=1.
    for (cx, cy) in [(3u16, 0u16), (4, 0), (3, 1), (4, 1)] {
        let cell = fb.get(1 + cx * 2, 1 + cy).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, color(PieceKind::O));
    }
    assert_ne!(fb.get(1 + 5 * 2, 1).unwrap().ch, '█');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut gs = GameState::new(1);
    gs.start();
    let mut snap = gs.snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.lines = 10;

    let fb = GameView::default().render(&snap, Viewport::new(60, 22));
    let all = screen_text(&fb);

    assert!(all.contains("PLAYING"));
    assert!(all.contains("SCORE"));
    assert!(all.contains("1,234"));
    assert!(all.contains("LEVEL"));
    assert!(all.contains("LINES"));
    assert!(all.contains("NEXT"));
}

#[test]
fn term_view_omits_panel_on_narrow_viewports() {
    let mut gs = GameState::new(1);
    gs.start();
    let fb = GameView::default().render(&gs.snapshot(), Viewport::new(22, 22));
    assert!(!screen_text(&fb).contains("SCORE"));
}

#[test]
fn term_view_preview_shows_next_piece() {
    let snap = GameSnapshot {
        next: Some(PieceKind::T),
        ..GameSnapshot::default()
    };
    let fb = GameView::default().render(&snap, Viewport::new(60, 22));

    let t_color = color(PieceKind::T);
    let blocks = fb
        .cells()
        .iter()
        .filter(|c| c.ch == '█' && c.style.fg == t_color)
        .count();
    // Four cells, two columns each.
    assert_eq!(blocks, 8);
}

#[test]
fn term_view_overlays() {
    let view = GameView::default();

    let paused = GameSnapshot {
        paused: true,
        ..GameSnapshot::default()
    };
    let fb = view.render(&paused, Viewport::new(22, 22));
    assert!(fb.row_text(10).contains("PAUSED"));

    let over = GameSnapshot {
        game_over: true,
        ..GameSnapshot::default()
    };
    let fb = view.render(&over, Viewport::new(22, 22));
    assert!(fb.row_text(10).contains("GAME OVER"));
    assert!(fb.row_text(11).contains("restart"));
}

#[test]
fn term_view_centers_board_vertically() {
    let snap = GameState::new(1).snapshot();

    // start_y = (30 - 22) / 2 = 4
    let fb = GameView::default().render(&snap, Viewport::new(22, 30));
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');
}

#[test]
fn term_view_render_into_reuses_buffer() {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    view.render_into(&GameSnapshot::default(), Viewport::new(40, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 24));

    view.render_into(&GameSnapshot::default(), Viewport::new(22, 22), &mut fb);
    assert_eq!((fb.width(), fb.height()), (22, 22));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

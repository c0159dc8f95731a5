//! Integration tests for the game state machine, driven through the facade.

use blockfall::core::{Board, GameState, Tetromino};
use blockfall::input::handle_key_event;
use blockfall::types::{GameAction, PieceKind, BOARD_WIDTH};
use crossterm::event::{KeyCode, KeyEvent};

fn game_with(kind: PieceKind, board: Board) -> GameState {
    let mut state = GameState::new(12345).with_board(board);
    state.start();
    state.with_active(Some(Tetromino::new(kind)))
}

/// Board with rows `ys` filled except columns `gap`
fn board_with_gaps(ys: &[i8], gap: std::ops::Range<i8>) -> Board {
    let mut board = Board::new();
    for &y in ys {
        for x in 0..BOARD_WIDTH as i8 {
            if !gap.contains(&x) {
                board.set(x, y, Some(PieceKind::L));
            }
        }
    }
    board
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert!(state.active().is_none());

    state.start();
    let active = state.active().unwrap();
    assert_eq!((active.x, active.y), (3, 0));
    assert!(state.next().is_some());
    assert!(!state.game_over());
    assert!(!state.paused());
    assert_eq!(state.level(), 1);
    assert_eq!(state.drop_interval_ms(), 1000);
}

#[test]
fn test_same_seed_same_game() {
    let actions = [
        GameAction::MoveLeft,
        GameAction::Rotate,
        GameAction::HardDrop,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::HardDrop,
        GameAction::MoveDown,
        GameAction::HardDrop,
    ];

    let mut a = GameState::new(99);
    let mut b = GameState::new(99);
    a.start();
    b.start();
    for action in actions {
        a.dispatch(action);
        b.dispatch(action);
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_single_line_clear_scores_at_level() {
    let mut state = game_with(PieceKind::I, board_with_gaps(&[19], 3..7));

    assert!(state.dispatch(GameAction::HardDrop));
    assert_eq!(state.lines(), 1);
    // 100 x level 1, plus 19 cells x 2.
    assert_eq!(state.score(), 100 + 38);
    assert_eq!(state.board().filled_count(), 0);
}

#[test]
fn test_four_line_clear_with_vertical_i() {
    let mut state = game_with(PieceKind::I, board_with_gaps(&[16, 17, 18, 19], 0..1));
    state.dispatch(GameAction::Rotate);
    // The rotated I is a column at mask column 2; walk it to the left wall.
    for _ in 0..5 {
        state.dispatch(GameAction::MoveLeft);
    }
    assert_eq!(state.active().unwrap().x, -2);

    let event_score_before = state.score();
    state.dispatch(GameAction::HardDrop);
    assert_eq!(state.lines(), 4);
    // Column occupies anchor rows 0..=3; valid anchors are 0..=16.
    assert_eq!(state.score() - event_score_before, 800 + 2 * 17);
    assert_eq!(state.board().filled_count(), 0);
}

#[test]
fn test_level_up_changes_gravity() {
    let mut state = game_with(PieceKind::I, board_with_gaps(&[19], 3..7));
    // Nine lines already cleared; the next clear reaches level 2.
    for _ in 0..9 {
        state = state.with_active(Some(Tetromino::new(PieceKind::I)));
        let filled = board_with_gaps(&[19], 3..7);
        state = state.with_board(filled);
        state.dispatch(GameAction::HardDrop);
    }
    assert_eq!(state.lines(), 9);
    assert_eq!(state.level(), 1);

    state = state
        .with_board(board_with_gaps(&[19], 3..7))
        .with_active(Some(Tetromino::new(PieceKind::I)));
    state.dispatch(GameAction::HardDrop);
    assert_eq!(state.lines(), 10);
    assert_eq!(state.level(), 2);
    assert_eq!(state.drop_interval_ms(), 900);
    assert_eq!(state.gravity_key().interval_ms(), Some(900));
}

#[test]
fn test_soft_drop_until_lock() {
    let mut state = game_with(PieceKind::O, Board::new());
    let mut moves = 0;
    while state.active().map(|p| p.kind) == Some(PieceKind::O) && state.active().unwrap().y < 18 {
        assert!(state.dispatch(GameAction::MoveDown));
        moves += 1;
    }
    assert_eq!(moves, 18);

    // One more step is blocked by the floor and locks without points.
    assert!(state.dispatch(GameAction::MoveDown));
    assert_eq!(state.board().filled_count(), 4);
    assert_eq!(state.score(), 0);
    assert_eq!(state.active().unwrap().y, 0);
}

#[test]
fn test_stacking_to_the_top_ends_the_game() {
    let mut state = GameState::new(4242);
    state.start();

    let mut drops = 0;
    while !state.game_over() {
        state.dispatch(GameAction::HardDrop);
        drops += 1;
        assert!(drops < 200, "stack should reach the top");
    }
    assert!(state.active().is_none());

    // Nothing but restart works now.
    let snap = state.snapshot();
    for action in [
        GameAction::MoveLeft,
        GameAction::MoveDown,
        GameAction::Rotate,
        GameAction::HardDrop,
    ] {
        assert!(!state.dispatch(action));
    }
    assert_eq!(state.snapshot(), snap);

    assert!(state.dispatch(GameAction::Restart));
    assert!(!state.game_over());
    assert_eq!(state.score(), 0);
    assert_eq!(state.board().filled_count(), 0);
}

#[test]
fn test_pause_blocks_gravity_and_moves() {
    let mut state = game_with(PieceKind::T, Board::new());
    state.dispatch(GameAction::Pause);

    assert!(!state.gravity_tick());
    assert!(!state.dispatch(GameAction::HardDrop));
    assert_eq!(state.active().unwrap().y, 0);
    assert_eq!(state.gravity_key().interval_ms(), None);

    state.dispatch(GameAction::Resume);
    assert!(state.gravity_tick());
    assert_eq!(state.active().unwrap().y, 1);
}

#[test]
fn test_keys_drive_the_game() {
    let mut state = game_with(PieceKind::T, Board::new());

    let press = |state: &mut GameState, code: KeyCode| {
        let snap = state.snapshot();
        if let Some(action) = handle_key_event(KeyEvent::from(code), &snap) {
            state.dispatch(action);
        }
    };

    press(&mut state, KeyCode::Right);
    press(&mut state, KeyCode::Down);
    assert_eq!(state.active().map(|p| (p.x, p.y)), Some((4, 1)));

    press(&mut state, KeyCode::Char('p'));
    assert!(state.paused());
    press(&mut state, KeyCode::Left);
    assert_eq!(state.active().unwrap().x, 4);
    press(&mut state, KeyCode::Char('p'));
    assert!(!state.paused());

    press(&mut state, KeyCode::Char(' '));
    assert!(state.score() > 0);
}

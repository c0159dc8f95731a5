//! Key mapping from terminal events to game actions.
//!
//! The mapping depends on the current snapshot: `P` toggles between pause and
//! resume, and while the game is over the only accepted keys are the ones
//! that start a new game.

use blockfall_core::GameSnapshot;
use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a key press to a game action, given the state being shown.
pub fn handle_key_event(key: KeyEvent, snapshot: &GameSnapshot) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release || key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    if snapshot.game_over {
        return match key.code {
            KeyCode::Char(' ') | KeyCode::Char('r') | KeyCode::Char('R') => {
                Some(GameAction::Restart)
            }
            _ => None,
        };
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GameAction::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameAction::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GameAction::MoveDown)
        }

        // Rotation (clockwise only)
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(GameAction::Rotate),

        KeyCode::Char(' ') => Some(GameAction::HardDrop),

        KeyCode::Char('p') | KeyCode::Char('P') => Some(if snapshot.paused {
            GameAction::Resume
        } else {
            GameAction::Pause
        }),

        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn playing() -> GameSnapshot {
        GameSnapshot::default()
    }

    #[test]
    fn test_movement_keys() {
        let snap = playing();
        assert_eq!(
            handle_key_event(key(KeyCode::Left), &snap),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Right), &snap),
            Some(GameAction::MoveRight)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Down), &snap),
            Some(GameAction::MoveDown)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('H')), &snap),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('j')), &snap),
            Some(GameAction::MoveDown)
        );
    }

    #[test]
    fn test_rotate_and_drop() {
        let snap = playing();
        assert_eq!(
            handle_key_event(key(KeyCode::Up), &snap),
            Some(GameAction::Rotate)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('w')), &snap),
            Some(GameAction::Rotate)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char(' ')), &snap),
            Some(GameAction::HardDrop)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('r')), &snap),
            Some(GameAction::Restart)
        );
    }

    #[test]
    fn test_pause_key_toggles() {
        let mut snap = playing();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('p')), &snap),
            Some(GameAction::Pause)
        );
        snap.paused = true;
        assert_eq!(
            handle_key_event(key(KeyCode::Char('P')), &snap),
            Some(GameAction::Resume)
        );
    }

    #[test]
    fn test_game_over_only_restarts() {
        let snap = GameSnapshot {
            game_over: true,
            ..GameSnapshot::default()
        };
        assert_eq!(
            handle_key_event(key(KeyCode::Char(' ')), &snap),
            Some(GameAction::Restart)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('R')), &snap),
            Some(GameAction::Restart)
        );
        assert_eq!(handle_key_event(key(KeyCode::Left), &snap), None);
        assert_eq!(handle_key_event(key(KeyCode::Char('p')), &snap), None);
    }

    #[test]
    fn test_releases_and_ctrl_are_ignored() {
        let snap = playing();
        let release = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key_event(release, &snap), None);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &snap),
            None
        );
    }

    #[test]
    fn test_unmapped_keys() {
        let snap = playing();
        assert_eq!(handle_key_event(key(KeyCode::Char('x')), &snap), None);
        assert_eq!(handle_key_event(key(KeyCode::Esc), &snap), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(key(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(key(KeyCode::Char('x'))));
    }
}

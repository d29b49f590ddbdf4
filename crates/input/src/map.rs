//! Key mapping from terminal events to game actions.

use crate::types::{Direction, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Slides: arrows, WASD, vi keys
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(GameAction::Slide(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(GameAction::Slide(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(GameAction::Slide(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(GameAction::Slide(Direction::Down))
        }

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn slide(code: KeyCode) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(slide(KeyCode::Left), Some(GameAction::Slide(Direction::Left)));
        assert_eq!(slide(KeyCode::Right), Some(GameAction::Slide(Direction::Right)));
        assert_eq!(slide(KeyCode::Up), Some(GameAction::Slide(Direction::Up)));
        assert_eq!(slide(KeyCode::Down), Some(GameAction::Slide(Direction::Down)));
    }

    #[test]
    fn test_letter_keys() {
        assert_eq!(slide(KeyCode::Char('A')), Some(GameAction::Slide(Direction::Left)));
        assert_eq!(slide(KeyCode::Char('l')), Some(GameAction::Slide(Direction::Right)));
        assert_eq!(slide(KeyCode::Char('w')), Some(GameAction::Slide(Direction::Up)));
        assert_eq!(slide(KeyCode::Char('J')), Some(GameAction::Slide(Direction::Down)));
        assert_eq!(slide(KeyCode::Char('r')), Some(GameAction::Restart));
        assert_eq!(slide(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_control_chords_are_not_slides() {
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}

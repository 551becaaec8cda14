//! Key mapping for the game screen.

use crate::checkers::{CheckersInput, Difficulty};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Result of handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward to the game session
    Game(CheckersInput),
    Quit,
}

/// Map a terminal key event to an action.
pub fn map_key(key: KeyEvent) -> KeyAction {
    // Windows terminals also report releases
    if key.kind == KeyEventKind::Release {
        return KeyAction::Game(CheckersInput::Other);
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('k') => CheckersInput::Up,
        KeyCode::Down | KeyCode::Char('j') => CheckersInput::Down,
        KeyCode::Left | KeyCode::Char('h') => CheckersInput::Left,
        KeyCode::Right | KeyCode::Char('l') => CheckersInput::Right,
        KeyCode::Enter | KeyCode::Char(' ') => CheckersInput::Select,
        KeyCode::Char('n') | KeyCode::Char('N') => CheckersInput::NewGame,
        KeyCode::Char(c @ '1'..='3') => {
            CheckersInput::SetDifficulty(Difficulty::from_index(c as usize - '1' as usize))
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return KeyAction::Quit,
        _ => CheckersInput::Other,
    };
    KeyAction::Game(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_and_enter() {
        assert_eq!(map_key(key(KeyCode::Up)), KeyAction::Game(CheckersInput::Up));
        assert_eq!(map_key(key(KeyCode::Left)), KeyAction::Game(CheckersInput::Left));
        assert_eq!(map_key(key(KeyCode::Enter)), KeyAction::Game(CheckersInput::Select));
    }

    #[test]
    fn test_difficulty_keys() {
        assert_eq!(
            map_key(key(KeyCode::Char('1'))),
            KeyAction::Game(CheckersInput::SetDifficulty(Difficulty::Easy))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('3'))),
            KeyAction::Game(CheckersInput::SetDifficulty(Difficulty::Hard))
        );
        assert_eq!(map_key(key(KeyCode::Char('4'))), KeyAction::Game(CheckersInput::Other));
    }

    #[test]
    fn test_new_game_and_quit() {
        assert_eq!(map_key(key(KeyCode::Char('n'))), KeyAction::Game(CheckersInput::NewGame));
        assert_eq!(map_key(key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(map_key(key(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_key_release_ignored() {
        let mut release = key(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release), KeyAction::Game(CheckersInput::Other));
    }
}

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub use crate::direction::Direction;

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Restart,
    ToggleMute,
    Quit,
}

/// Polls the terminal for key events without blocking the frame loop.
#[derive(Debug, Clone, Copy)]
pub struct InputHandler {
    poll_timeout: Duration,
}

impl InputHandler {
    #[must_use]
    pub fn new(poll_timeout: Duration) -> Self {
        Self { poll_timeout }
    }

    /// Returns the next mapped input, or `None` when nothing relevant arrived
    /// within the poll timeout.
    pub fn poll_input(&mut self) -> io::Result<Option<GameInput>> {
        if !event::poll(self.poll_timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}

/// Maps a key event to a game input.
///
/// Direction keys fire on press and repeat; toggles fire on press only so a
/// held key does not flip them back and forth.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let direction = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => Some(Direction::Right),
        _ => None,
    };
    if let Some(direction) = direction {
        return Some(GameInput::Direction(direction));
    }

    if key.kind == KeyEventKind::Repeat {
        return None;
    }

    match key.code {
        KeyCode::Char('p' | 'P' | ' ') => Some(GameInput::Pause),
        KeyCode::Enter | KeyCode::Char('r' | 'R') => Some(GameInput::Restart),
        KeyCode::Char('m' | 'M') => Some(GameInput::ToggleMute),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(GameInput::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use super::{map_key, Direction, GameInput};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        assert_eq!(
            map_key(key(KeyCode::Up, KeyEventKind::Press)),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('a'), KeyEventKind::Press)),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(
            map_key(key(KeyCode::Right, KeyEventKind::Repeat)),
            Some(GameInput::Direction(Direction::Right))
        );
    }

    #[test]
    fn toggles_ignore_release_and_repeat() {
        assert_eq!(
            map_key(key(KeyCode::Char('p'), KeyEventKind::Press)),
            Some(GameInput::Pause)
        );
        assert_eq!(map_key(key(KeyCode::Char('p'), KeyEventKind::Repeat)), None);
        assert_eq!(map_key(key(KeyCode::Char('m'), KeyEventKind::Release)), None);
        assert_eq!(
            map_key(key(KeyCode::Enter, KeyEventKind::Press)),
            Some(GameInput::Restart)
        );
    }

    #[test]
    fn quit_keys() {
        assert_eq!(
            map_key(key(KeyCode::Esc, KeyEventKind::Press)),
            Some(GameInput::Quit)
        );
        let ctrl_c = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char('c'), KeyEventKind::Press)
        };
        assert_eq!(map_key(ctrl_c), Some(GameInput::Quit));
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        assert_eq!(map_key(key(KeyCode::Char('x'), KeyEventKind::Press)), None);
        assert_eq!(map_key(key(KeyCode::Tab, KeyEventKind::Press)), None);
    }
}

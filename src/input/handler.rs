use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    Start,
    Pause,
    Reset,
    ToggleWraparound,
    /// Set an absolute step rate
    StepRate(u32),
    Faster,
    Slower,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Turn(Direction::North),
            KeyCode::Down => KeyAction::Turn(Direction::South),
            KeyCode::Left => KeyAction::Turn(Direction::West),
            KeyCode::Right => KeyAction::Turn(Direction::East),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Turn(Direction::North),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Turn(Direction::South),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Turn(Direction::West),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Turn(Direction::East),

            // Lifecycle
            KeyCode::Enter => KeyAction::Start,
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::Pause,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Reset,
            KeyCode::Char('t') | KeyCode::Char('T') => KeyAction::ToggleWraparound,

            // Step speed: 1-9, with 0 meaning 10
            KeyCode::Char('0') => KeyAction::StepRate(10),
            KeyCode::Char(c @ '1'..='9') => KeyAction::StepRate(c as u32 - '0' as u32),
            KeyCode::Char('+') | KeyCode::Char('=') => KeyAction::Faster,
            KeyCode::Char('-') | KeyCode::Char('_') => KeyAction::Slower,

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

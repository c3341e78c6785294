use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// A console button: d-pad or start
    Button(Command),
    /// Flip the power switch
    Power,
    /// Begin a new game, also after game over
    Restart,
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
            // D-pad - Arrow keys
            KeyCode::Up => KeyAction::Button(Command::Up),
            KeyCode::Down => KeyAction::Button(Command::Down),
            KeyCode::Left => KeyAction::Button(Command::Left),
            KeyCode::Right => KeyAction::Button(Command::Right),

            // D-pad - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Button(Command::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Button(Command::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Button(Command::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Button(Command::Right),

            // Start button
            KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Button(Command::Start),

            // Controls
            KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::Power,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
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

use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// Turns raw key events into one press per physical key-down
///
/// Terminals that report key releases let us track held keys and swallow
/// auto-repeated presses. Elsewhere every `Press` passes through and only
/// explicit `Repeat` events are dropped.
pub struct KeyDebouncer {
    reports_releases: bool,
    held: HashSet<KeyCode>,
}

impl KeyDebouncer {
    pub fn new(reports_releases: bool) -> Self {
        Self {
            reports_releases,
            held: HashSet::new(),
        }
    }

    /// Returns true if the event is a fresh press that should be acted on
    pub fn accept(&mut self, key: &KeyEvent) -> bool {
        let code = physical_key(key.code);
        match key.kind {
            KeyEventKind::Press => !self.reports_releases || self.held.insert(code),
            KeyEventKind::Repeat => false,
            KeyEventKind::Release => {
                self.held.remove(&code);
                false
            }
        }
    }
}

/// Shift can change between press and release, so letters are tracked caseless
fn physical_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn event(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_held_key_fires_once() {
        let mut debouncer = KeyDebouncer::new(true);

        assert!(debouncer.accept(&event(KeyCode::Up, KeyEventKind::Press)));
        assert!(!debouncer.accept(&event(KeyCode::Up, KeyEventKind::Press)));
        assert!(!debouncer.accept(&event(KeyCode::Up, KeyEventKind::Repeat)));

        // A different key is independent
        assert!(debouncer.accept(&event(KeyCode::Left, KeyEventKind::Press)));

        assert!(!debouncer.accept(&event(KeyCode::Up, KeyEventKind::Release)));
        assert!(debouncer.accept(&event(KeyCode::Up, KeyEventKind::Press)));
    }

    #[test]
    fn test_release_matches_press_across_shift() {
        let mut debouncer = KeyDebouncer::new(true);

        assert!(debouncer.accept(&event(KeyCode::Char('W'), KeyEventKind::Press)));
        assert!(!debouncer.accept(&event(KeyCode::Char('w'), KeyEventKind::Press)));
        assert!(!debouncer.accept(&event(KeyCode::Char('w'), KeyEventKind::Release)));
        assert!(debouncer.accept(&event(KeyCode::Char('W'), KeyEventKind::Press)));

        assert!(!debouncer.accept(&event(KeyCode::Char('W'), KeyEventKind::Release)));
        assert!(debouncer.accept(&event(KeyCode::Char('w'), KeyEventKind::Press)));
    }

    #[test]
    fn test_without_release_reporting() {
        let mut debouncer = KeyDebouncer::new(false);

        assert!(debouncer.accept(&event(KeyCode::Enter, KeyEventKind::Press)));
        assert!(debouncer.accept(&event(KeyCode::Enter, KeyEventKind::Press)));
        assert!(!debouncer.accept(&event(KeyCode::Enter, KeyEventKind::Repeat)));
    }
}

//! `KeyBindings`: maps crossterm key events onto logical [`Keys`].

use crate::keys::Keys;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

/// Table from physical terminal keys to logical keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(KeyCode, Keys)>,
}

impl KeyBindings {
    /// Create an empty table.
    pub const fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bind `code` to `keys`, replacing an earlier binding of `code`.
    #[must_use]
    pub fn bind(mut self, code: KeyCode, keys: Keys) -> Self {
        self.bindings.retain(|(bound, _)| *bound != code);
        self.bindings.push((code, keys));
        self
    }

    /// Logical keys bound to `code`.
    pub fn lookup(&self, code: KeyCode) -> Keys {
        // Letters are matched case-insensitively.
        let code = match code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        self.bindings
            .iter()
            .filter(|(bound, _)| *bound == code)
            .fold(Keys::empty(), |keys, (_, bound)| keys | *bound)
    }

    /// Logical keys pressed by a terminal event.
    ///
    /// Only key presses count; releases, repeats and non-key events map to
    /// no keys.
    pub fn translate(&self, event: &Event) -> Keys {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => self.lookup(*code),
            _ => Keys::empty(),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::empty()
            .bind(KeyCode::Enter, Keys::A)
            .bind(KeyCode::Char(' '), Keys::A)
            .bind(KeyCode::Char('z'), Keys::A)
            .bind(KeyCode::Esc, Keys::B)
            .bind(KeyCode::Char('x'), Keys::B)
            .bind(KeyCode::Tab, Keys::SELECT)
            .bind(KeyCode::Char('s'), Keys::START)
            .bind(KeyCode::Char('a'), Keys::L)
            .bind(KeyCode::Char('d'), Keys::R)
            .bind(KeyCode::Left, Keys::LEFT)
            .bind(KeyCode::Right, Keys::RIGHT)
            .bind(KeyCode::Up, Keys::UP)
            .bind(KeyCode::Down, Keys::DOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
    }

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.lookup(KeyCode::Enter), Keys::A);
        assert_eq!(bindings.lookup(KeyCode::Char('Z')), Keys::A);
        assert_eq!(bindings.lookup(KeyCode::Esc), Keys::B);
        assert_eq!(bindings.lookup(KeyCode::Char('q')), Keys::empty());
    }

    #[test]
    fn test_translate_only_presses() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.translate(&key(KeyCode::Enter, KeyEventKind::Press)), Keys::A);
        assert_eq!(bindings.translate(&key(KeyCode::Enter, KeyEventKind::Release)), Keys::empty());
        assert_eq!(bindings.translate(&Event::FocusGained), Keys::empty());
    }

    #[test]
    fn test_rebind() {
        let bindings = KeyBindings::default().bind(KeyCode::Enter, Keys::START);
        assert_eq!(bindings.lookup(KeyCode::Enter), Keys::START);

        let both = KeyBindings::empty().bind(KeyCode::Char('k'), Keys::A | Keys::B);
        assert_eq!(both.lookup(KeyCode::Char('k')), Keys::A | Keys::B);
    }
}

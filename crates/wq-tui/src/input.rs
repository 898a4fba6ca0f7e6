//! Input handling - convert terminal events to actions, and the guess field

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use strum::Display;

/// Direction of a map pan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

/// What a terminal event asks the app to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append a character to the guess field
    Type(char),
    /// Append pasted text to the guess field
    Paste(String),
    Backspace,
    /// Empty the guess field without guessing
    ClearField,
    ZoomIn,
    ZoomOut,
    ResetView,
    Pan(PanDirection),
    /// Left click at a terminal cell
    Click { column: u16, row: u16 },
    /// Mouse moved over a terminal cell
    Hover { column: u16, row: u16 },
    Quit,
}

/// Convert a key event to an action.
///
/// Printable characters always go to the guess field, so map controls live
/// on keys that never appear in a country name.
pub fn key_to_action(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),      // Ctrl+C: quit
            KeyCode::Char('u') => Some(Action::ClearField), // Ctrl+U: clear field
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(c) => Some(Action::Type(c)),
        KeyCode::Backspace => Some(Action::Backspace),

        // Zoom / pan, as the zoom in, zoom out and reset buttons
        KeyCode::PageUp => Some(Action::ZoomIn),
        KeyCode::PageDown => Some(Action::ZoomOut),
        KeyCode::Home => Some(Action::ResetView),
        KeyCode::Up => Some(Action::Pan(PanDirection::Up)),
        KeyCode::Down => Some(Action::Pan(PanDirection::Down)),
        KeyCode::Left => Some(Action::Pan(PanDirection::Left)),
        KeyCode::Right => Some(Action::Pan(PanDirection::Right)),

        _ => None,
    }
}

/// Convert any terminal event to an action
pub fn event_to_action(event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => key_to_action(key),
        Event::Paste(text) => Some(Action::Paste(text)),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ZoomIn),
            MouseEventKind::ScrollDown => Some(Action::ZoomOut),
            MouseEventKind::Down(MouseButton::Left) => Some(Action::Click {
                column: mouse.column,
                row: mouse.row,
            }),
            MouseEventKind::Moved => Some(Action::Hover {
                column: mouse.column,
                row: mouse.row,
            }),
            _ => None,
        },
        _ => None,
    }
}

/// The single-line guess field
#[derive(Debug, Clone, Default)]
pub struct TextField {
    value: String,
    disabled: bool,
}

impl TextField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn disable(&mut self) {
        self.disabled = true;
    }

    /// Returns whether the value changed
    pub fn push(&mut self, c: char) -> bool {
        if self.disabled || c.is_control() {
            return false;
        }
        self.value.push(c);
        true
    }

    /// Returns whether the value changed
    pub fn push_str(&mut self, text: &str) -> bool {
        if self.disabled {
            return false;
        }
        let before = self.value.len();
        self.value.extend(text.chars().filter(|c| !c.is_control()));
        self.value.len() != before
    }

    /// Returns whether the value changed
    pub fn pop(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        self.value.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_printable_keys_type() {
        assert_eq!(key_to_action(key(KeyCode::Char('f'))), Some(Action::Type('f')));
        assert_eq!(key_to_action(key(KeyCode::Char('+'))), Some(Action::Type('+')));
        assert_eq!(
            key_to_action(KeyEvent::new(KeyCode::Char('F'), KeyModifiers::SHIFT)),
            Some(Action::Type('F'))
        );
    }

    #[test]
    fn test_control_keys() {
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(ctrl('c')), Some(Action::Quit));
        assert_eq!(key_to_action(ctrl('u')), Some(Action::ClearField));
        assert_eq!(key_to_action(ctrl('x')), None);
    }

    #[test]
    fn test_map_keys() {
        assert_eq!(key_to_action(key(KeyCode::PageUp)), Some(Action::ZoomIn));
        assert_eq!(key_to_action(key(KeyCode::PageDown)), Some(Action::ZoomOut));
        assert_eq!(key_to_action(key(KeyCode::Home)), Some(Action::ResetView));
        assert_eq!(
            key_to_action(key(KeyCode::Left)),
            Some(Action::Pan(PanDirection::Left))
        );
        assert_eq!(key_to_action(key(KeyCode::Esc)), Some(Action::Quit));
    }

    #[test]
    fn test_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(key_to_action(release), None);
    }

    #[test]
    fn test_mouse_events() {
        let mouse = |kind| {
            Event::Mouse(MouseEvent {
                kind,
                column: 7,
                row: 3,
                modifiers: KeyModifiers::NONE,
            })
        };
        assert_eq!(event_to_action(mouse(MouseEventKind::ScrollUp)), Some(Action::ZoomIn));
        assert_eq!(
            event_to_action(mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(Action::Click { column: 7, row: 3 })
        );
        assert_eq!(
            event_to_action(mouse(MouseEventKind::Moved)),
            Some(Action::Hover { column: 7, row: 3 })
        );
        assert_eq!(event_to_action(mouse(MouseEventKind::Up(MouseButton::Left))), None);
    }

    #[test]
    fn test_paste() {
        assert_eq!(
            event_to_action(Event::Paste("france".to_string())),
            Some(Action::Paste("france".to_string()))
        );
    }

    #[test]
    fn test_text_field_edits() {
        let mut field = TextField::default();
        assert!(field.push('f'));
        assert!(field.push_str("ra\nnce"));
        assert_eq!(field.value(), "france");
        assert!(field.pop());
        assert_eq!(field.value(), "franc");
        field.clear();
        assert!(field.is_empty());
        assert!(!field.pop());
    }

    #[test]
    fn test_disabled_field_ignores_edits() {
        let mut field = TextField::default();
        field.push('x');
        field.disable();
        assert!(!field.push('y'));
        assert!(!field.push_str("abc"));
        assert!(!field.pop());
        assert_eq!(field.value(), "x");
    }
}

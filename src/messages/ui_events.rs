//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Events generated in the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A key press for the App layer to interpret
    Key(KeyEvent),
    /// Terminal size, sent at startup and on every resize
    Resize { width: u16, height: u16 },
    /// Drawing the current state panicked
    RenderFault(String),
    /// Recovery screen: rebuild view state from storage
    Reload,
    /// Recovery screen: return to the previous route
    Back,
    Quit,
}

/// Convert a key event to a UiEvent. While the recovery screen is up only
/// its own actions are live.
pub fn key_to_ui_event(key: KeyEvent, has_fault: bool) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if has_fault {
        return match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => Some(UiEvent::Reload),
            KeyCode::Char('b') | KeyCode::Char('B') => Some(UiEvent::Back),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(UiEvent::Quit),
            _ => None,
        };
    }

    Some(UiEvent::Key(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_keys_forwarded_normally() {
        let key = press(KeyCode::Char('t'));
        assert_eq!(key_to_ui_event(key, false), Some(UiEvent::Key(key)));
    }

    #[test]
    fn test_recovery_screen_keys() {
        assert_eq!(key_to_ui_event(press(KeyCode::Char('r')), true), Some(UiEvent::Reload));
        assert_eq!(key_to_ui_event(press(KeyCode::Char('b')), true), Some(UiEvent::Back));
        assert_eq!(key_to_ui_event(press(KeyCode::Char('t')), true), None);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_ui_event(key, false), Some(UiEvent::Quit));
        assert_eq!(key_to_ui_event(key, true), Some(UiEvent::Quit));
    }

    #[test]
    fn test_release_ignored() {
        let mut key = press(KeyCode::Char('t'));
        key.kind = KeyEventKind::Release;
        assert_eq!(key_to_ui_event(key, false), None);
    }
}

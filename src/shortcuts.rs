//! Keyboard shortcut table and dispatcher.
//!
//! The dispatcher is a two-state machine: `Idle`, and `AwaitingSecondKey`
//! after the `g` prefix. A pending sequence resolves on the next key or is
//! abandoned once the timeout passes.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

use crate::constants::SEQUENCE_PREFIX;
use crate::nav::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Navigate(Route),
    ToggleTheme,
    ToggleHelp,
    ToggleMenu,
    PrevSection,
    NextSection,
    Back,
    Quit,
}

/// Key combination that triggers a shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keys {
    /// One key press, with required modifiers (Shift is ignored)
    Single(KeyCode, KeyModifiers),
    /// Prefix key followed by a second key
    Sequence(char, char),
}

impl Keys {
    const fn key(c: char) -> Keys {
        Keys::Single(KeyCode::Char(c), KeyModifiers::NONE)
    }

    const fn ctrl(code: KeyCode) -> Keys {
        Keys::Single(code, KeyModifiers::CONTROL)
    }

    /// Human-readable form shown in the help overlay
    pub fn display(&self) -> String {
        match self {
            Keys::Sequence(a, b) => format!("{} {}", a.to_ascii_uppercase(), b.to_ascii_uppercase()),
            Keys::Single(code, mods) => {
                let key = match code {
                    KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
                    KeyCode::Up => "↑".to_string(),
                    KeyCode::Down => "↓".to_string(),
                    other => format!("{:?}", other),
                };
                if mods.contains(KeyModifiers::CONTROL) {
                    format!("Ctrl + {}", key)
                } else {
                    key
                }
            }
        }
    }
}

/// One entry of the static shortcut table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub keys: Keys,
    pub label: &'static str,
    pub action: ShortcutAction,
}

const fn shortcut(keys: Keys, label: &'static str, action: ShortcutAction) -> Shortcut {
    Shortcut {
        keys,
        label,
        action,
    }
}

pub const SHORTCUTS: &[Shortcut] = &[
    shortcut(Keys::Sequence(SEQUENCE_PREFIX, 'h'), "Go to Home", ShortcutAction::Navigate(Route::Home)),
    shortcut(Keys::Sequence(SEQUENCE_PREFIX, 'a'), "Go to About", ShortcutAction::Navigate(Route::About)),
    shortcut(Keys::Sequence(SEQUENCE_PREFIX, 'p'), "Go to Projects", ShortcutAction::Navigate(Route::Projects)),
    shortcut(Keys::Sequence(SEQUENCE_PREFIX, 'c'), "Go to Contact", ShortcutAction::Navigate(Route::Contact)),
    shortcut(Keys::key('1'), "Home", ShortcutAction::Navigate(Route::Home)),
    shortcut(Keys::key('2'), "About", ShortcutAction::Navigate(Route::About)),
    shortcut(Keys::key('3'), "Projects", ShortcutAction::Navigate(Route::Projects)),
    shortcut(Keys::key('4'), "Contact", ShortcutAction::Navigate(Route::Contact)),
    shortcut(Keys::key('k'), "Toggle keyboard shortcuts", ShortcutAction::ToggleHelp),
    shortcut(Keys::key('?'), "Toggle keyboard shortcuts", ShortcutAction::ToggleHelp),
    shortcut(Keys::key('t'), "Toggle theme", ShortcutAction::ToggleTheme),
    shortcut(Keys::key('m'), "Toggle menu", ShortcutAction::ToggleMenu),
    shortcut(Keys::ctrl(KeyCode::Up), "Previous section", ShortcutAction::PrevSection),
    shortcut(Keys::ctrl(KeyCode::Down), "Next section", ShortcutAction::NextSection),
    shortcut(Keys::key('b'), "Go back", ShortcutAction::Back),
    shortcut(Keys::key('q'), "Quit", ShortcutAction::Quit),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    AwaitingSecondKey { since: Instant },
}

/// Outcome of feeding one key to the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Fired(ShortcutAction),
    /// Prefix accepted, waiting for the second key
    Pending,
    /// Second key did not complete a sequence; the key is consumed
    Abandoned,
    /// Not a shortcut; caller may handle it
    Unhandled,
}

pub struct ShortcutDispatcher {
    state: DispatchState,
    timeout: Duration,
    table: &'static [Shortcut],
}

impl ShortcutDispatcher {
    pub fn new(timeout: Duration) -> Self {
        ShortcutDispatcher {
            state: DispatchState::Idle,
            timeout,
            table: SHORTCUTS,
        }
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, DispatchState::AwaitingSecondKey { .. })
    }

    /// Feed a key. `text_focused` suppresses all dispatch while a text
    /// field owns the keyboard.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant, text_focused: bool) -> Dispatch {
        if key.kind != KeyEventKind::Press {
            return Dispatch::Unhandled;
        }
        if text_focused {
            self.cancel();
            return Dispatch::Unhandled;
        }

        // A sequence that outlived its window is dropped before this key is seen
        self.expire(now);

        if let DispatchState::AwaitingSecondKey { .. } = self.state {
            self.state = DispatchState::Idle;
            let second = match key.code {
                KeyCode::Char(c) if plain(key.modifiers) => c.to_ascii_lowercase(),
                _ => return Dispatch::Abandoned,
            };
            return self
                .table
                .iter()
                .find(|s| s.keys == Keys::Sequence(SEQUENCE_PREFIX, second))
                .map(|s| Dispatch::Fired(s.action))
                .unwrap_or(Dispatch::Abandoned);
        }

        if key.code == KeyCode::Char(SEQUENCE_PREFIX) && plain(key.modifiers) {
            self.state = DispatchState::AwaitingSecondKey { since: now };
            return Dispatch::Pending;
        }

        self.table
            .iter()
            .find(|s| single_matches(&s.keys, &key))
            .map(|s| Dispatch::Fired(s.action))
            .unwrap_or(Dispatch::Unhandled)
    }

    /// Return to `Idle` if a pending sequence timed out. Returns true when
    /// something was abandoned.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.state {
            DispatchState::AwaitingSecondKey { since }
                if now.saturating_duration_since(since) >= self.timeout =>
            {
                self.state = DispatchState::Idle;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.state = DispatchState::Idle;
    }
}

fn plain(modifiers: KeyModifiers) -> bool {
    modifiers.difference(KeyModifiers::SHIFT).is_empty()
}

fn single_matches(keys: &Keys, key: &KeyEvent) -> bool {
    let Keys::Single(code, mods) = keys else {
        return false;
    };
    if key.modifiers.difference(KeyModifiers::SHIFT) != *mods {
        return false;
    }
    match (code, key.code) {
        (KeyCode::Char(expected), KeyCode::Char(pressed)) => {
            expected.eq_ignore_ascii_case(&pressed)
        }
        (expected, pressed) => *expected == pressed,
    }
}

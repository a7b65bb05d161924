//! Global UI state store: theme and menu flags.
//!
//! The store is the only writer of both flags. Theme changes are written to
//! [`Storage`] before observers are notified, so a restart always reflects
//! the last choice.

use tokio::sync::watch;

use crate::constants::{FIRST_VISIT_KEY, THEME_KEY};
use crate::storage::Storage;

/// Observable view of the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiSnapshot {
    pub is_dark_mode: bool,
    pub is_menu_open: bool,
}

pub struct UiStore {
    is_dark_mode: bool,
    is_menu_open: bool,
    storage: Storage,
    system_prefers_dark: Option<bool>,
    observers: watch::Sender<UiSnapshot>,
}

impl UiStore {
    /// Build the store. Theme precedence: stored value, then
    /// `system_prefers_dark`, then light.
    pub fn new(storage: Storage, system_prefers_dark: Option<bool>) -> Self {
        let is_dark_mode = initial_theme(&storage, system_prefers_dark);
        let snapshot = UiSnapshot {
            is_dark_mode,
            is_menu_open: false,
        };
        let (observers, _) = watch::channel(snapshot);

        UiStore {
            is_dark_mode,
            is_menu_open: false,
            storage,
            system_prefers_dark,
            observers,
        }
    }

    pub fn is_dark_mode(&self) -> bool {
        self.is_dark_mode
    }

    pub fn set_dark_mode(&mut self, is_dark: bool) {
        self.is_dark_mode = is_dark;
        if let Err(e) = self.storage.set(THEME_KEY, theme_value(is_dark)) {
            tracing::warn!(error = %e, "Could not persist theme");
        }
        tracing::info!(theme = theme_value(is_dark), "Theme changed");
        self.notify();
    }

    pub fn toggle_dark_mode(&mut self) {
        self.set_dark_mode(!self.is_dark_mode);
    }

    pub fn is_menu_open(&self) -> bool {
        self.is_menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.is_menu_open = !self.is_menu_open;
        self.notify();
    }

    pub fn snapshot(&self) -> UiSnapshot {
        UiSnapshot {
            is_dark_mode: self.is_dark_mode,
            is_menu_open: self.is_menu_open,
        }
    }

    /// Observe every change. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<UiSnapshot> {
        self.observers.subscribe()
    }

    /// True only on the first start against this storage; marks the visit
    pub fn take_first_visit(&mut self) -> bool {
        if self.storage.get(FIRST_VISIT_KEY).is_some() {
            return false;
        }
        if let Err(e) = self.storage.set(FIRST_VISIT_KEY, "true") {
            tracing::warn!(error = %e, "Could not record first visit");
        }
        true
    }

    /// Re-initialize from durable state, as a fresh start would
    pub fn reload(&mut self) {
        self.storage.reload();
        self.is_dark_mode = initial_theme(&self.storage, self.system_prefers_dark);
        self.is_menu_open = false;
        self.notify();
    }

    fn notify(&self) {
        self.observers.send_replace(self.snapshot());
    }
}

pub fn theme_value(is_dark: bool) -> &'static str {
    if is_dark {
        "dark"
    } else {
        "light"
    }
}

fn initial_theme(storage: &Storage, system_prefers_dark: Option<bool>) -> bool {
    match storage.get(THEME_KEY) {
        Some(saved) => saved == "dark",
        None => system_prefers_dark.unwrap_or(false),
    }
}

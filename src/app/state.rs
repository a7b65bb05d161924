//! App state - pure data structure with no I/O logic

use std::sync::Arc;

use crate::config::AppConfig;
use crate::form::ContactFormState;
use crate::messages::{RenderState, SubmitCommand};
use crate::models::Portfolio;
use crate::nav::{Navigator, Route};
use crate::notification::NotificationCenter;
use crate::shortcuts::ShortcutDispatcher;
use crate::signals::Signal;
use crate::store::UiStore;

/// Side effects the App actor performs on behalf of a state transition
#[derive(Debug, Clone)]
pub enum Effect {
    Submit(SubmitCommand),
    Emit(Signal),
    Quit,
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Global flags (theme, menu)
    pub store: UiStore,

    // Navigation
    pub nav: Navigator,
    pub dispatcher: ShortcutDispatcher,
    pub menu_selected: usize,

    // Page
    pub portfolio: Arc<Portfolio>,
    pub scroll: u16,
    pub viewport_height: u16,

    // Contact form
    pub form: ContactFormState,
    pub next_submission_id: u64,
    pub pending_submission: Option<u64>,

    // Overlays
    pub notifications: NotificationCenter,
    pub show_help: bool,

    /// Set when drawing failed; the recovery screen is up
    pub fault: Option<String>,
}

impl AppState {
    pub fn new(store: UiStore, portfolio: Arc<Portfolio>, start: Route, config: &AppConfig) -> Self {
        AppState {
            store,
            nav: Navigator::new(start),
            dispatcher: ShortcutDispatcher::new(config.sequence_timeout()),
            menu_selected: start.index(),
            portfolio,
            scroll: 0,
            viewport_height: 20,
            form: ContactFormState::new(),
            next_submission_id: 1,
            pending_submission: None,
            notifications: NotificationCenter::new(config.notification_duration()),
            show_help: false,
            fault: None,
        }
    }

    pub fn route(&self) -> Route {
        self.nav.current()
    }

    /// A text field owns the keyboard; shortcuts are off
    pub fn is_text_focused(&self) -> bool {
        self.route() == Route::Contact && self.form.editing
    }

    /// Convert to render state for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            route: self.route(),
            can_go_back: self.nav.can_go_back(),
            is_dark_mode: self.store.is_dark_mode(),
            is_menu_open: self.store.is_menu_open(),
            menu_selected: self.menu_selected,
            scroll: self.scroll,
            portfolio: Arc::clone(&self.portfolio),
            form: self.form.clone(),
            show_help: self.show_help,
            pending_sequence: self.dispatcher.is_pending(),
            notification: self.notifications.current().cloned(),
            fault: self.fault.clone(),
        }
    }
}

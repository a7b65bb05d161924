//! Render state - data structure sent from App layer to UI for rendering

use std::sync::Arc;

use crate::form::ContactFormState;
use crate::models::Portfolio;
use crate::nav::Route;
use crate::notification::Notification;

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Navigation
    pub route: Route,
    pub can_go_back: bool,

    // Global UI flags
    pub is_dark_mode: bool,
    pub is_menu_open: bool,
    pub menu_selected: usize,

    // Page
    pub scroll: u16,
    pub portfolio: Arc<Portfolio>,

    // Contact form
    pub form: ContactFormState,

    // Overlays
    pub show_help: bool,
    /// A `g` sequence is waiting for its second key
    pub pending_sequence: bool,
    pub notification: Option<Notification>,
    /// Error text shown by the recovery screen
    pub fault: Option<String>,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            route: Route::Home,
            can_go_back: false,
            is_dark_mode: false,
            is_menu_open: false,
            menu_selected: 0,
            scroll: 0,
            portfolio: Arc::new(Portfolio::default()),
            form: ContactFormState::new(),
            show_help: false,
            pending_sequence: false,
            notification: None,
            fault: None,
        }
    }
}

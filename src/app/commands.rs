//! Command handlers - business logic for processing UI events

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

use crate::app::state::{AppState, Effect};
use crate::constants::{SUBMIT_FAILURE_MESSAGE, SUBMIT_SUCCESS_MESSAGE, WELCOME_MESSAGE};
use crate::form::{ContactFormState, FormFocus};
use crate::messages::{SubmitCommand, SubmitResponse, UiEvent};
use crate::nav::Route;
use crate::notification::NotificationKind;
use crate::shortcuts::{Dispatch, ShortcutAction};
use crate::signals::Signal;
use crate::ui::{layout, pages};

impl AppState {
    pub fn handle_ui_event(&mut self, event: UiEvent, now: Instant) -> Option<Effect> {
        match event {
            UiEvent::Key(key) => self.handle_key(key, now),
            UiEvent::Resize { width, height } => {
                self.viewport_height = layout::page_height(width, height);
                self.clamp_scroll();
                None
            }
            UiEvent::RenderFault(message) => {
                tracing::error!(route = self.route().path(), error = %message, "Render failed");
                self.fault = Some(message);
                None
            }
            UiEvent::Reload => {
                self.reload();
                None
            }
            UiEvent::Back => {
                self.fault = None;
                self.go_back();
                None
            }
            UiEvent::Quit => Some(Effect::Quit),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<Effect> {
        if self.fault.is_some() {
            return None;
        }

        if self.is_text_focused() {
            // Abandons any pending sequence
            self.dispatcher.handle_key(key, now, true);
            return self.handle_editing_key(key);
        }

        if self.show_help && key.code == KeyCode::Esc {
            self.show_help = false;
            return None;
        }

        if self.store.is_menu_open() {
            if let Some(effect) = self.handle_menu_key(key) {
                return effect;
            }
        }

        match self.dispatcher.handle_key(key, now, false) {
            Dispatch::Fired(action) => self.apply_shortcut(action),
            Dispatch::Pending | Dispatch::Abandoned => None,
            Dispatch::Unhandled => self.handle_page_key(key),
        }
    }

    pub fn apply_shortcut(&mut self, action: ShortcutAction) -> Option<Effect> {
        match action {
            ShortcutAction::Navigate(route) => self.navigate(route),
            ShortcutAction::ToggleTheme => return Some(Effect::Emit(Signal::ToggleTheme)),
            ShortcutAction::ToggleHelp => return Some(Effect::Emit(Signal::ToggleKeyboardHelp)),
            ShortcutAction::ToggleMenu => {
                self.menu_selected = self.route().index();
                self.store.toggle_menu();
            }
            ShortcutAction::PrevSection => self.jump_section(-1),
            ShortcutAction::NextSection => self.jump_section(1),
            ShortcutAction::Back => self.go_back(),
            ShortcutAction::Quit => return Some(Effect::Quit),
        }
        None
    }

    pub fn handle_signal(&mut self, signal: Signal) {
        tracing::debug!(signal = signal.name(), "Signal received");
        match signal {
            Signal::ToggleTheme => self.store.toggle_dark_mode(),
            Signal::ToggleKeyboardHelp => self.show_help = !self.show_help,
        }
    }

    // ========================
    // Navigation
    // ========================

    pub fn navigate(&mut self, route: Route) {
        let from = self.route();
        if self.nav.navigate(route) {
            tracing::info!(from = from.path(), to = route.path(), "Navigated");
            self.on_route_changed();
        }
        self.close_menu();
    }

    pub fn go_back(&mut self) {
        if let Some(route) = self.nav.back() {
            tracing::info!(to = route.path(), "Navigated back");
            self.on_route_changed();
        }
        self.close_menu();
    }

    fn close_menu(&mut self) {
        if self.store.is_menu_open() {
            self.store.toggle_menu();
        }
    }

    fn on_route_changed(&mut self) {
        self.scroll = 0;
        self.form.stop_editing();
        self.menu_selected = self.route().index();
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> Option<Option<Effect>> {
        let count = Route::ALL.len();
        match key.code {
            KeyCode::Up => self.menu_selected = (self.menu_selected + count - 1) % count,
            KeyCode::Down => self.menu_selected = (self.menu_selected + 1) % count,
            KeyCode::Enter => {
                if let Some(route) = Route::from_index(self.menu_selected) {
                    self.navigate(route);
                }
            }
            KeyCode::Esc => self.store.toggle_menu(),
            _ => return None,
        }
        Some(None)
    }

    // ========================
    // Scrolling
    // ========================

    fn document(&self) -> pages::DocumentLayout {
        pages::document_layout(self.route(), &self.portfolio, &self.form)
    }

    fn max_scroll(&self) -> u16 {
        self.document().max_scroll(self.viewport_height)
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let max = i32::from(self.max_scroll());
        self.scroll = (i32::from(self.scroll) + delta).clamp(0, max) as u16;
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Scroll to the start of the previous/next section
    pub fn jump_section(&mut self, direction: i32) {
        let doc = self.document();
        if doc.offsets.is_empty() {
            return;
        }
        let current = doc.active_section(self.scroll, self.viewport_height);
        let target = if direction < 0 {
            current.saturating_sub(1)
        } else {
            (current + 1).min(doc.offsets.len() - 1)
        };
        if target != current {
            self.scroll = doc.offsets[target].min(doc.max_scroll(self.viewport_height));
        }
    }

    fn scroll_to_form(&mut self) {
        if let Some(&start) = self.document().offsets.last() {
            self.scroll = start.min(self.max_scroll());
        }
    }

    fn handle_page_key(&mut self, key: KeyEvent) -> Option<Effect> {
        let page = i32::from(self.viewport_height.saturating_sub(2).max(1));
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('x') | KeyCode::Char('X') if !ctrl => self.notifications.dismiss(),
            KeyCode::Esc => self.notifications.dismiss(),
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::PageDown => self.scroll_by(page),
            KeyCode::Home => self.scroll = 0,
            KeyCode::End => self.scroll = self.max_scroll(),
            _ if self.route() == Route::Contact => return self.handle_form_key(key),
            _ => {}
        }
        None
    }

    // ========================
    // Contact form
    // ========================

    /// Form keys while no field is being edited
    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Effect> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if ctrl => return self.submit(),
            KeyCode::Tab => {
                self.form.focus_next();
                self.scroll_to_form();
            }
            KeyCode::BackTab => {
                self.form.focus_prev();
                self.scroll_to_form();
            }
            KeyCode::Enter | KeyCode::Char('e') if !ctrl => {
                if self.form.focus == FormFocus::Submit {
                    return self.submit();
                }
                self.form.start_editing();
                self.scroll_to_form();
            }
            _ => {}
        }
        None
    }

    /// Keys while a text field owns the keyboard
    fn handle_editing_key(&mut self, key: KeyEvent) -> Option<Effect> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.form.stop_editing(),
            KeyCode::Tab => self.form.focus_next(),
            KeyCode::BackTab => self.form.focus_prev(),
            KeyCode::Char('s') if ctrl => return self.submit(),
            KeyCode::Char('w') if ctrl => self.form.delete_word_back(),
            KeyCode::Enter => {
                if self.form.focused_field() == Some(crate::form::Field::Message) {
                    self.form.insert_char('\n');
                } else {
                    self.form.focus_next();
                }
            }
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Left => self.form.cursor_left(),
            KeyCode::Right => self.form.cursor_right(),
            KeyCode::Home => self.form.cursor_home(),
            KeyCode::End => self.form.cursor_end(),
            KeyCode::Char(c) if !ctrl => self.form.insert_char(c),
            _ => {}
        }
        None
    }

    /// Validate and hand the message to the Submit actor
    pub fn submit(&mut self) -> Option<Effect> {
        if self.form.is_submitting {
            tracing::debug!("Submission already in flight");
            return None;
        }
        let Some(form) = self.form.begin_submit() else {
            tracing::debug!(errors = self.form.errors.count(), "Contact form invalid");
            return None;
        };

        let id = self.next_submission_id;
        self.next_submission_id += 1;
        self.pending_submission = Some(id);
        tracing::info!(id, "Contact form submitted");
        Some(Effect::Submit(SubmitCommand::Submit { id, form }))
    }

    pub fn handle_submit_response(&mut self, response: SubmitResponse, now: Instant) {
        if self.pending_submission != Some(response.id()) {
            tracing::debug!(id = response.id(), "Ignoring stale submit response");
            return;
        }
        self.pending_submission = None;

        if let SubmitResponse::Sent { id, time_ms } = &response {
            tracing::info!(id, time_ms, "Contact message delivered");
        }
        let success = response.is_success();
        self.form.finish_submit(success);
        if success {
            self.notifications
                .show(SUBMIT_SUCCESS_MESSAGE, NotificationKind::Success, now);
        } else {
            self.notifications
                .show(SUBMIT_FAILURE_MESSAGE, NotificationKind::Error, now);
        }
    }

    // ========================
    // Lifecycle
    // ========================

    pub fn welcome(&mut self, now: Instant) {
        tracing::info!("First visit");
        self.notifications
            .show(WELCOME_MESSAGE, NotificationKind::Success, now);
    }

    /// Advance timers. Returns true when something visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let abandoned = self.dispatcher.expire(now);
        let expired = self.notifications.expire(now);
        abandoned || expired
    }

    /// Rebuild view state from storage, keeping the route
    pub fn reload(&mut self) {
        tracing::info!(route = self.route().path(), "Reloading view state");
        self.fault = None;
        self.store.reload();
        self.dispatcher.cancel();
        self.form = ContactFormState::new();
        self.pending_submission = None;
        self.notifications.dismiss();
        self.show_help = false;
        self.scroll = 0;
        self.menu_selected = self.route().index();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::form::Field;
    use crate::models::Portfolio;
    use crate::storage::Storage;
    use crate::store::UiStore;
    use std::sync::Arc;
    use std::time::Duration;

    fn state(dir: &std::path::Path) -> AppState {
        let store = UiStore::new(Storage::open_in(dir), None);
        AppState::new(
            store,
            Arc::new(Portfolio::default()),
            Route::Home,
            &AppConfig::default(),
        )
    }

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn code(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut AppState, text: &str, now: Instant) {
        for c in text.chars() {
            app.handle_key(press(c), now);
        }
    }

    #[test]
    fn test_sequence_navigates() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = state(dir.path());
        let now = Instant::now();

        assert!(app.handle_key(press('g'), now).is_none());
        assert!(app.to_render_state().pending_sequence);
        app.handle_key(press('a'), now + Duration::from_millis(200));
        assert_eq!(app.route(), Route::About);
        assert!(app.nav.can_go_back());
    }

    #[test]
    fn test_tick_abandons_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = state(dir.path());
        let now = Instant::now();

        app.handle_key(press('g'), now);
        assert!(app.tick(now + Duration::from_secs(2)));
        assert!(!app.dispatcher.is_pending());
        assert_eq!(app.route(), Route::Home);
    }

    #[test]
    fn test_theme_and_help_go_through_signals() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = state(dir.path());
        let now = Instant::now();

        assert!(matches!(
            app.handle_key(press('t'), now),
            Some(Effect::Emit(Signal::ToggleTheme))
        ));
        assert!(!app.store.is_dark_mode());
        app.handle_signal(Signal::ToggleTheme);
        assert!(app.store.is_dark_mode());

        assert!(matches!(
            app.handle_key(press('k'), now),
            Some(Effect::Emit(Signal::ToggleKeyboardHelp))
        ));
        app.handle_signal(Signal::ToggleKeyboardHelp);
        assert!(app.show_help);
        app.handle_key(code(KeyCode::Esc), now);
        assert!(!app.show_help);
    }

    #[test]
    fn test_menu_selection_navigates_and_closes() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = state(dir.path());
        let now = Instant::now();

        app.handle_key(press('m'), now);
        assert!(app.store.is_menu_open());
        app.handle_key(code(KeyCode::Down), now);
        app.handle_key(code(KeyCode::Down), now);
        app.handle_key(code(KeyCode::Enter), now);

        assert_eq!(app.route(), Route::Projects);
        assert!(!app.store.is_menu_open());
    }

    #[test]
    fn test_back_closes_open_menu() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = state(dir.path());
        let now = Instant::now();

        app.handle_key(press('2'), now);
        assert_eq!(app.route(), Route::About);
        app.handle_key(press('m'), now);
        assert!(app.store.is_menu_open());

        app.handle_key(press('b'), now);
        assert_eq!(app.route(), Route::Home);
        assert!(!app.store.is_menu_open());
    }

    #[test]
    fn test_back_returns_to_previous_route() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = state(dir.path());
        let now = Instant::now();

        app.handle_key(press('4'), now);
        app.handle_key(press('2'), now);
        app.handle_key(press('b'), now);
        assert_eq!(app.route(), Route::Contact);
    }

    #[test]
    fn test_section_jumps() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = state(dir.path());
        app.handle_ui_event(UiEvent::Resize { width: 100, height: 12 }, Instant::now());
        app.navigate(Route::About);

        let doc = pages::document_layout(Route::About, &app.portfolio, &app.form);
        app.jump_section(1);
        assert_eq!(app.scroll, doc.offsets[1].min(doc.max_scroll(app.viewport_height)));
        app.jump_section(-1);
        assert_eq!(app.scroll, 0);
        app.jump_section(-1);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn test_typing_in_form_suppresses_shortcuts() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = state(dir.path());
        let now = Instant::now();

        app.navigate(Route::Contact);
        app.handle_key(press('e'), now);
        assert!(app.is_text_focused());

        type_text(&mut app, "gt1q", now);
        assert_eq!(app.form.value(Field::Name), "gt1q");
        assert_eq!(app.route(), Route::Contact);
        assert!(!app.store.is_dark_mode());

        app.handle_key(code(KeyCode::Esc), now);
        assert!(!app.is_text_focused());
    }

    #[test]
    fn test_invalid_form_does_not_submit() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = state(dir.path());
        app.navigate(Route::Contact);

        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(app.handle_key(ctrl_s, Instant::now()).is_none());
        assert_eq!(app.form.errors.count(), 3);
        assert!(app.pending_submission.is_none());
    }

    fn fill_form(app: &mut AppState, now: Instant) {
        app.navigate(Route::Contact);
        app.handle_key(press('e'), now);
        type_text(app, "Jane", now);
        app.handle_key(code(KeyCode::Enter), now);
        app.form.start_editing();
        type_text(app, "jane@example.com", now);
        app.handle_key(code(KeyCode::Tab), now);
        app.form.start_editing();
        type_text(app, "Hi there", now);
        app.handle_key(code(KeyCode::Esc), now);
    }

    #[test]
    fn test_submit_success_flow() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = state(dir.path());
        let now = Instant::now();
        fill_form(&mut app, now);

        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        let id = match app.handle_key(ctrl_s, now) {
            Some(Effect::Submit(SubmitCommand::Submit { id, form })) => {
                assert_eq!(form.email, "jane@example.com");
                assert_eq!(form.message, "Hi there");
                id
            }
            other => panic!("expected a submission, got {:?}", other),
        };
        assert!(app.form.is_submitting);

        // Disabled while in flight
        assert!(app.handle_key(ctrl_s, now).is_none());

        app.handle_submit_response(SubmitResponse::Sent { id, time_ms: 1000 }, now);
        assert!(!app.form.is_submitting);
        assert_eq!(app.form.value(Field::Name), "");
        let n = app.notifications.current().unwrap();
        assert_eq!(n.message, SUBMIT_SUCCESS_MESSAGE);
        assert_eq!(n.kind, NotificationKind::Success);
    }

    #[test]
    fn test_submit_failure_keeps_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = state(dir.path());
        let now = Instant::now();
        fill_form(&mut app, now);

        let Some(Effect::Submit(SubmitCommand::Submit { id, .. })) = app.submit() else {
            panic!("expected a submission");
        };
        app.handle_submit_response(
            SubmitResponse::Failed { id, message: "simulated failure".into() },
            now,
        );
        assert_eq!(app.form.value(Field::Name), "Jane");
        let n = app.notifications.current().unwrap();
        assert_eq!(n.message, SUBMIT_FAILURE_MESSAGE);
        assert_eq!(n.kind, NotificationKind::Error);
    }

    #[test]
    fn test_notification_auto_dismiss_via_tick() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = state(dir.path());
        let now = Instant::now();
        app.welcome(now);
        assert!(app.notifications.is_visible());
        assert!(!app.tick(now + Duration::from_secs(1)));
        assert!(app.tick(now + Duration::from_secs(5)));
        assert!(!app.notifications.is_visible());
    }

    #[test]
    fn test_fault_blocks_keys_until_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = state(dir.path());
        let now = Instant::now();
        app.navigate(Route::Projects);

        app.handle_ui_event(UiEvent::RenderFault("boom".into()), now);
        assert!(app.to_render_state().fault.is_some());
        app.handle_key(press('1'), now);
        assert_eq!(app.route(), Route::Projects);

        app.handle_ui_event(UiEvent::Reload, now);
        assert!(app.fault.is_none());
        assert_eq!(app.route(), Route::Projects);
    }

    #[test]
    fn test_fault_back_leaves_route() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = state(dir.path());
        let now = Instant::now();
        app.navigate(Route::Projects);

        app.handle_ui_event(UiEvent::RenderFault("boom".into()), now);
        app.handle_ui_event(UiEvent::Back, now);
        assert!(app.fault.is_none());
        assert_eq!(app.route(), Route::Home);
    }
}

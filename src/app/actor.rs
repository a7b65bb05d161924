//! App actor - message loop processing UI events, signals and submit responses

use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};
use tokio::time::MissedTickBehavior;

use crate::app::state::{AppState, Effect};
use crate::constants::{TICK_MS, WELCOME_HELP_DELAY_MS};
use crate::messages::{RenderState, SubmitCommand, SubmitResponse, UiEvent};
use crate::signals::{Signal, SignalBus};

/// App actor that owns all state and processes one event at a time
pub struct AppActor {
    state: AppState,
    bus: SignalBus,
    submit_tx: mpsc::UnboundedSender<SubmitCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        bus: SignalBus,
        submit_tx: mpsc::UnboundedSender<SubmitCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            bus,
            submit_tx,
            render_tx,
        }
    }

    /// Run the actor message loop. Returns when the user quits or the UI
    /// layer goes away; dropping `render_tx` then tells the UI to stop.
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut submit_rx: mpsc::UnboundedReceiver<SubmitResponse>,
    ) {
        // Listener lives for the whole loop; dropping it deregisters
        let mut signals = self.bus.subscribe();
        let mut ui_flags = self.state.store.subscribe();

        let mut ticker = tokio::time::interval(Duration::from_millis(TICK_MS));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        if self.state.store.take_first_visit() {
            self.state.welcome(Instant::now());
            self.bus.emit_after(
                Signal::ToggleKeyboardHelp,
                Duration::from_millis(WELCOME_HELP_DELAY_MS),
            );
        }

        // Send initial render state
        self.render();

        loop {
            tokio::select! {
                // Signals emitted by the previous key land before the next key
                biased;

                signal = signals.recv() => {
                    match signal {
                        Ok(signal) => self.state.handle_signal(signal),
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "Signal listener lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                    self.render();
                }

                event = ui_rx.recv() => {
                    let Some(event) = event else { break };
                    match self.state.handle_ui_event(event, Instant::now()) {
                        Some(Effect::Quit) => {
                            tracing::info!("Quit requested");
                            break;
                        }
                        Some(effect) => self.apply(effect),
                        None => {}
                    }
                    self.render();
                }

                Some(response) = submit_rx.recv() => {
                    self.state.handle_submit_response(response, Instant::now());
                    self.render();
                }

                Ok(()) = ui_flags.changed() => {
                    let flags = *ui_flags.borrow_and_update();
                    tracing::debug!(dark = flags.is_dark_mode, menu = flags.is_menu_open, "UI flags changed");
                    self.render();
                }

                _ = ticker.tick() => {
                    if self.state.tick(Instant::now()) {
                        self.render();
                    }
                }
            }
        }

        let _ = self.submit_tx.send(SubmitCommand::Shutdown);
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Submit(cmd) => {
                if self.submit_tx.send(cmd).is_err() {
                    tracing::error!("Submit actor is gone");
                    let id = self.state.pending_submission.unwrap_or_default();
                    self.state.handle_submit_response(
                        SubmitResponse::Failed {
                            id,
                            message: crate::submit::SubmitError::Unavailable.to_string(),
                        },
                        Instant::now(),
                    );
                }
            }
            Effect::Emit(signal) => self.bus.emit(signal),
            Effect::Quit => {}
        }
    }

    fn render(&self) {
        let _ = self.render_tx.send(self.state.to_render_state());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::Portfolio;
    use crate::nav::Route;
    use crate::storage::Storage;
    use crate::store::UiStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::Arc;

    struct Harness {
        ui_tx: mpsc::UnboundedSender<UiEvent>,
        render_rx: mpsc::UnboundedReceiver<RenderState>,
        handle: tokio::task::JoinHandle<()>,
        _submit_tx: mpsc::UnboundedSender<SubmitResponse>,
        _submit_rx: mpsc::UnboundedReceiver<SubmitCommand>,
    }

    fn spawn(dir: &std::path::Path) -> Harness {
        let store = UiStore::new(Storage::open_in(dir), None);
        let state = AppState::new(store, Arc::new(Portfolio::default()), Route::Home, &AppConfig::default());

        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (submit_cmd_tx, submit_cmd_rx) = mpsc::unbounded_channel();
        let (submit_resp_tx, submit_resp_rx) = mpsc::unbounded_channel();
        let (render_tx, render_rx) = mpsc::unbounded_channel();

        let actor = AppActor::new(state, SignalBus::new(), submit_cmd_tx, render_tx);
        let handle = tokio::spawn(actor.run(ui_rx, submit_resp_rx));
        Harness {
            ui_tx,
            render_rx,
            handle,
            _submit_tx: submit_resp_tx,
            _submit_rx: submit_cmd_rx,
        }
    }

    fn key(c: char) -> UiEvent {
        UiEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    async fn wait_for(rx: &mut mpsc::UnboundedReceiver<RenderState>, pred: impl Fn(&RenderState) -> bool) -> RenderState {
        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                let state = rx.recv().await.expect("actor stopped");
                if pred(&state) {
                    return state;
                }
            }
        })
        .await
        .expect("render state never matched")
    }

    #[tokio::test]
    async fn test_first_visit_shows_welcome() {
        let dir = tempfile::tempdir().unwrap();
        let mut h = spawn(dir.path());

        let first = h.render_rx.recv().await.unwrap();
        let welcome = first.notification.unwrap();
        assert!(welcome.message.contains("Press 'K'"));
        assert_eq!(
            Storage::open_in(dir.path()).get(crate::constants::FIRST_VISIT_KEY),
            Some("true")
        );
        h.handle.abort();
    }

    #[tokio::test]
    async fn test_theme_key_round_trips_through_signal_bus() {
        let dir = tempfile::tempdir().unwrap();
        Storage::open_in(dir.path())
            .set(crate::constants::FIRST_VISIT_KEY, "true")
            .unwrap();
        let mut h = spawn(dir.path());

        let first = h.render_rx.recv().await.unwrap();
        assert!(first.notification.is_none());
        assert!(!first.is_dark_mode);

        h.ui_tx.send(key('t')).unwrap();
        wait_for(&mut h.render_rx, |s| s.is_dark_mode).await;
        assert_eq!(
            Storage::open_in(dir.path()).get(crate::constants::THEME_KEY),
            Some("dark")
        );
        h.handle.abort();
    }

    #[tokio::test]
    async fn test_burst_of_theme_keys_keeps_every_toggle() {
        let dir = tempfile::tempdir().unwrap();
        Storage::open_in(dir.path())
            .set(crate::constants::FIRST_VISIT_KEY, "true")
            .unwrap();

        let store = UiStore::new(Storage::open_in(dir.path()), None);
        let state = AppState::new(store, Arc::new(Portfolio::default()), Route::Home, &AppConfig::default());
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (submit_cmd_tx, _submit_cmd_rx) = mpsc::unbounded_channel();
        let (_submit_resp_tx, submit_resp_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();

        // Queue everything before the loop starts so keys race the signal bus
        for _ in 0..201 {
            ui_tx.send(key('t')).unwrap();
        }
        ui_tx.send(key('q')).unwrap();

        let actor = AppActor::new(state, SignalBus::new(), submit_cmd_tx, render_tx);
        tokio::time::timeout(Duration::from_secs(2), actor.run(ui_rx, submit_resp_rx))
            .await
            .expect("actor did not quit");

        let mut last = None;
        while let Some(state) = render_rx.recv().await {
            last = Some(state);
        }
        assert!(last.unwrap().is_dark_mode);
        assert_eq!(
            Storage::open_in(dir.path()).get(crate::constants::THEME_KEY),
            Some("dark")
        );
    }

    #[tokio::test]
    async fn test_quit_stops_actor_and_render_channel() {
        let dir = tempfile::tempdir().unwrap();
        let mut h = spawn(dir.path());

        h.ui_tx.send(key('q')).unwrap();
        h.handle.await.unwrap();
        while h.render_rx.recv().await.is_some() {}
    }
}

//! Folio TUI - a developer portfolio in the terminal
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Submit Layer (Tokio) - async contact message delivery

use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::{value_parser, Arg, Command};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tracing_subscriber::EnvFilter;

use folio::config::{self, AppConfig};
use folio::constants::{APP_NAME, APP_VERSION};
use folio::messages::ui_events::key_to_ui_event;
use folio::messages::{RenderState, SubmitCommand, SubmitResponse, UiEvent};
use folio::nav::Route;
use folio::signals::SignalBus;
use folio::storage::{self, Storage};
use folio::store::UiStore;
use folio::submit::{SimulatedSubmitter, SubmitActor};
use folio::{ui, AppActor, AppState, Portfolio};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

fn cli() -> Command {
    Command::new("folio")
        .version(APP_VERSION)
        .about("A developer portfolio in your terminal")
        .arg(
            Arg::new("route")
                .long("route")
                .value_name("PATH")
                .help("Page to open first: /, /about, /projects or /contact"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Config file (defaults to <config dir>/folio/config.yaml)"),
        )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    }
    .context("loading config")?;

    let storage_dir = config.storage_dir.clone().unwrap_or_else(storage::default_dir);

    // Initialize logging to file
    let _log_guard = init_logging(&storage_dir)?;
    install_panic_hook();
    tracing::info!(version = APP_VERSION, "Starting {}", APP_NAME);

    let portfolio = match &config.content_file {
        Some(path) => Portfolio::load(path)
            .with_context(|| format!("loading content from {}", path.display()))?,
        None => Portfolio::default(),
    };

    let start = start_route(matches.get_one::<String>("route"), &config)?;

    let storage = Storage::open_in(&storage_dir);
    tracing::info!(path = %storage.path().display(), "Opened storage");
    let store = UiStore::new(storage, config.color_scheme.prefers_dark());
    let state = AppState::new(store, Arc::new(portfolio), start, &config);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (submit_cmd_tx, submit_cmd_rx) = mpsc::unbounded_channel::<SubmitCommand>();
    let (submit_resp_tx, submit_resp_rx) = mpsc::unbounded_channel::<SubmitResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn submit actor
    let submitter = Arc::new(SimulatedSubmitter::from_config(&config.submit));
    let submit_actor = SubmitActor::new(submitter, submit_resp_tx);
    tokio::spawn(submit_actor.run(submit_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(state, SignalBus::new(), submit_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, submit_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Exiting");
    Ok(())
}

fn start_route(arg: Option<&String>, config: &AppConfig) -> anyhow::Result<Route> {
    match arg.or(config.start_route.as_ref()) {
        Some(path) => Route::from_path(path).ok_or_else(|| anyhow!("unknown route: {}", path)),
        None => Ok(Route::Home),
    }
}

/// Log to `FOLIO_LOG` or `<data dir>/folio/folio.log`; never to the terminal
fn init_logging(data_dir: &Path) -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_path = std::env::var_os("FOLIO_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir.join("folio.log"));
    let dir = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_path
        .file_name()
        .ok_or_else(|| anyhow!("log path has no file name: {}", log_path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    Ok(guard)
}

/// Panics go to the log file instead of the raw-mode terminal
fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        tracing::error!(panic = %info, "Panic");
    }));
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown error".to_string()
    }
}

/// Show the recovery screen for a caught draw panic. Only the first fault
/// is reported; a panicking recovery screen must not flood the App actor.
fn record_fault(state: &mut RenderState, message: String) -> Option<UiEvent> {
    if state.fault.is_some() {
        tracing::error!(error = %message, "Recovery screen failed to draw");
        return None;
    }
    state.fault = Some(message.clone());
    Some(UiEvent::RenderFault(message))
}

/// Run the synchronous UI rendering loop. Ends once the App actor drops
/// its render channel.
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();
    let mut titled: Option<Route> = None;

    let size = terminal.size()?;
    let _ = ui_tx.send(UiEvent::Resize {
        width: size.width,
        height: size.height,
    });

    loop {
        if titled != Some(current_state.route) {
            execute!(io::stdout(), SetTitle(current_state.route.title()))?;
            titled = Some(current_state.route);
        }

        // Draw with current state; a panic swaps in the recovery screen
        let mut fault = None;
        terminal.draw(|f| {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| ui::draw(f, &current_state))) {
                fault = Some(panic_message(payload));
            }
        })?;
        if let Some(message) = fault {
            if let Some(event) = record_fault(&mut current_state, message) {
                let _ = ui_tx.send(event);
            }
        }

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(event) = key_to_ui_event(key, current_state.fault.is_some()) {
                        let _ = ui_tx.send(event);
                    }
                }
                Event::Resize(width, height) => {
                    let _ = ui_tx.send(UiEvent::Resize { width, height });
                }
                _ => {}
            }
        }

        // Check for state updates (non-blocking)
        loop {
            match render_rx.try_recv() {
                Ok(state) => current_state = state,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(()),
            }
        }
    }
}

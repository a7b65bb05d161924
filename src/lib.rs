//! # Folio TUI
//!
//! A personal developer portfolio rendered in the terminal.
//!
//! ## Features
//! - Home, About, Projects and Contact pages with section jumps
//! - Light and dark themes, remembered across runs
//! - Keyboard shortcuts, including `g`-prefixed "go to" sequences
//! - Contact form with inline validation and simulated delivery
//! - Transient notifications and a first-visit welcome
//! - Recovery screen when drawing fails
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous drawing and input polling
//! - App Layer (state machine) - owns every piece of state
//! - Submit Layer (Tokio runtime) - contact message delivery

pub mod app;
pub mod config;
pub mod constants;
pub mod form;
pub mod messages;
pub mod models;
pub mod nav;
pub mod notification;
pub mod shortcuts;
pub mod signals;
pub mod storage;
pub mod store;
pub mod submit;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::{AppConfig, ColorScheme};
pub use form::{validate, ContactForm, FormErrors};
pub use messages::{RenderState, SubmitCommand, SubmitResponse, UiEvent};
pub use models::Portfolio;
pub use nav::Route;
pub use signals::{Signal, SignalBus};
pub use storage::Storage;
pub use store::UiStore;
pub use submit::{ContactSubmitter, SimulatedSubmitter, SubmitActor, SubmitError};

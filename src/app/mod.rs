//! App layer - central state management and command processing
//!
//! The App actor receives UI events, signals and submit responses,
//! updates state, and emits submit commands and render state.

pub mod state;
pub mod actor;
pub mod commands;

pub use state::{AppState, Effect};
pub use actor::AppActor;

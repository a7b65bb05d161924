//! Message types for inter-layer communication in the actor-based architecture.
//!
//! This module defines all messages that flow between the UI, App, and Submit layers.

pub mod ui_events;
pub mod submit;
pub mod render;

pub use ui_events::UiEvent;
pub use submit::{SubmitCommand, SubmitResponse};
pub use render::RenderState;

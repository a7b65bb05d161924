//! Submit messages - communication between App and Submit layers

use crate::form::ContactForm;

/// Commands sent from App layer to Submit layer
#[derive(Debug, Clone)]
pub enum SubmitCommand {
    /// Deliver a validated contact message
    Submit { id: u64, form: ContactForm },
    /// Stop the actor, dropping anything in flight
    Shutdown,
}

/// Responses sent from Submit layer to App layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResponse {
    Sent { id: u64, time_ms: u64 },
    Failed { id: u64, message: String },
}

impl SubmitResponse {
    pub fn id(&self) -> u64 {
        match self {
            SubmitResponse::Sent { id, .. } => *id,
            SubmitResponse::Failed { id, .. } => *id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmitResponse::Sent { .. })
    }
}

//! Contact message delivery.
//!
//! Everything that sends a [`ContactForm`] goes through [`ContactSubmitter`].
//! The shipped implementation only simulates a round trip.

pub mod actor;

pub use actor::SubmitActor;

use std::time::Duration;

use crate::config::SubmitConfig;
use crate::form::ContactForm;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("delivery rejected: {0}")]
    Rejected(String),

    #[error("submitter is not running")]
    Unavailable,
}

/// Delivery seam for contact messages
#[async_trait::async_trait]
pub trait ContactSubmitter: Send + Sync {
    async fn submit(&self, form: &ContactForm) -> Result<(), SubmitError>;
}

/// Waits a fixed delay, then succeeds (or fails when told to)
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
    fail: bool,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration, fail: bool) -> Self {
        SimulatedSubmitter { delay, fail }
    }

    pub fn from_config(config: &SubmitConfig) -> Self {
        Self::new(config.delay(), config.simulate_failure)
    }
}

#[async_trait::async_trait]
impl ContactSubmitter for SimulatedSubmitter {
    async fn submit(&self, form: &ContactForm) -> Result<(), SubmitError> {
        tokio::time::sleep(self.delay).await;
        if self.fail {
            return Err(SubmitError::Rejected("simulated failure".to_string()));
        }
        tracing::debug!(
            name = %form.name,
            email = %form.email,
            chars = form.message.chars().count(),
            "Simulated delivery"
        );
        Ok(())
    }
}

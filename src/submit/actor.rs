//! Submit actor - runs contact deliveries in the Tokio runtime

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{SubmitCommand, SubmitResponse};
use crate::submit::ContactSubmitter;

/// Processes submit commands, one task per delivery
pub struct SubmitActor {
    submitter: Arc<dyn ContactSubmitter>,
    response_tx: mpsc::UnboundedSender<SubmitResponse>,
    in_flight: JoinSet<()>,
}

impl SubmitActor {
    pub fn new(
        submitter: Arc<dyn ContactSubmitter>,
        response_tx: mpsc::UnboundedSender<SubmitResponse>,
    ) -> Self {
        SubmitActor {
            submitter,
            response_tx,
            in_flight: JoinSet::new(),
        }
    }

    /// Run the actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<SubmitCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(SubmitCommand::Submit { id, form }) => {
                            let submitter = Arc::clone(&self.submitter);
                            let response_tx = self.response_tx.clone();

                            self.in_flight.spawn(async move {
                                tracing::info!(id, "Submitting contact message");
                                let started = Instant::now();
                                let response = match submitter.submit(&form).await {
                                    Ok(()) => SubmitResponse::Sent {
                                        id,
                                        time_ms: started.elapsed().as_millis() as u64,
                                    },
                                    Err(e) => {
                                        tracing::warn!(id, error = %e, "Submission failed");
                                        SubmitResponse::Failed { id, message: e.to_string() }
                                    }
                                };
                                tracing::info!(id, ok = response.is_success(), "Submission finished");
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(SubmitCommand::Shutdown) | None => {
                            // Deliveries are not cancellable; quitting drops them
                            self.in_flight.abort_all();
                            break;
                        }
                    }
                }

                Some(_result) = self.in_flight.join_next() => {}
            }
        }
    }
}

//! In-process broadcast signals.
//!
//! Decouples triggers (shortcuts, the first-visit detector) from the
//! components that react to them. Signals carry no payload.

use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    ToggleKeyboardHelp,
    ToggleTheme,
}

impl Signal {
    pub fn name(&self) -> &'static str {
        match self {
            Signal::ToggleKeyboardHelp => "toggle-keyboard-help",
            Signal::ToggleTheme => "toggle-theme",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SignalBus {
    tx: broadcast::Sender<Signal>,
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        SignalBus { tx }
    }

    /// Deliver `signal` to current listeners. With no listeners it is dropped.
    pub fn emit(&self, signal: Signal) {
        tracing::debug!(signal = signal.name(), "Emitting signal");
        if self.tx.send(signal).is_err() {
            tracing::debug!(signal = signal.name(), "No listeners");
        }
    }

    /// Register a listener; dropping the receiver deregisters it
    pub fn subscribe(&self) -> broadcast::Receiver<Signal> {
        self.tx.subscribe()
    }

    /// Emit `signal` once after `delay`
    pub fn emit_after(&self, signal: Signal, delay: Duration) -> JoinHandle<()> {
        let bus = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            bus.emit(signal);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_listeners_receive_signal() {
        let bus = SignalBus::new();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.emit(Signal::ToggleTheme);
        assert_eq!(a.recv().await.unwrap(), Signal::ToggleTheme);
        assert_eq!(b.recv().await.unwrap(), Signal::ToggleTheme);
    }

    #[test]
    fn test_drop_deregisters_listener() {
        let bus = SignalBus::new();
        let rx = bus.subscribe();
        assert_eq!(bus.tx.receiver_count(), 1);
        drop(rx);
        assert_eq!(bus.tx.receiver_count(), 0);
        // Emitting with nobody listening is harmless
        bus.emit(Signal::ToggleKeyboardHelp);
    }

    #[tokio::test]
    async fn test_emit_after_delay() {
        let bus = SignalBus::new();
        let mut rx = bus.subscribe();
        bus.emit_after(Signal::ToggleKeyboardHelp, Duration::from_millis(10))
            .await
            .unwrap();
        assert_eq!(rx.try_recv().unwrap(), Signal::ToggleKeyboardHelp);
    }
}

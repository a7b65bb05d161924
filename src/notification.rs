//! Single transient notification banner.
//!
//! There is never more than one notification: showing a new one replaces
//! the current content and restarts its deadline.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct NotificationCenter {
    current: Option<Notification>,
    duration: Duration,
}

impl NotificationCenter {
    pub fn new(duration: Duration) -> Self {
        NotificationCenter {
            current: None,
            duration,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        let message = message.into();
        tracing::debug!(kind = ?kind, message = %message, "Showing notification");
        self.current = Some(Notification {
            message,
            kind,
            expires_at: now + self.duration,
        });
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Drop the notification once its deadline has passed.
    /// Returns true when something was hidden.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(n) if now >= n.expires_at => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center() -> NotificationCenter {
        NotificationCenter::new(Duration::from_secs(5))
    }

    #[test]
    fn test_second_show_replaces_first() {
        let mut c = center();
        let t0 = Instant::now();
        c.show("first", NotificationKind::Success, t0);
        c.show("second", NotificationKind::Error, t0 + Duration::from_millis(100));

        let n = c.current().unwrap();
        assert!(c.is_visible());
        assert_eq!(n.message, "second");
        assert_eq!(n.kind, NotificationKind::Error);
    }

    #[test]
    fn test_replacement_restarts_deadline() {
        let mut c = center();
        let t0 = Instant::now();
        c.show("first", NotificationKind::Success, t0);
        c.show("second", NotificationKind::Success, t0 + Duration::from_secs(3));

        // The first deadline has passed but the replacement is still fresh
        assert!(!c.expire(t0 + Duration::from_secs(6)));
        assert!(c.is_visible());
        assert!(c.expire(t0 + Duration::from_secs(8)));
        assert!(!c.is_visible());
    }

    #[test]
    fn test_auto_dismiss_and_manual_dismiss() {
        let mut c = center();
        let t0 = Instant::now();
        c.show("hello", NotificationKind::Success, t0);
        assert!(!c.expire(t0 + Duration::from_secs(4)));
        assert!(c.expire(t0 + Duration::from_secs(5)));
        assert!(c.current().is_none());

        c.show("again", NotificationKind::Success, t0);
        c.dismiss();
        assert!(!c.is_visible());
        assert!(!c.expire(t0 + Duration::from_secs(10)));
    }
}

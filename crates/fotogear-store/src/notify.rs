//! # Notifications
//!
//! User-visible feedback ("toasts") emitted by the store. The shell decides
//! how they are shown; the store only says what happened.

use std::sync::Mutex;

/// Sink for user-visible notifications (implemented by the shell).
pub trait Notifier: Send + Sync {
    /// Something succeeded ("Canon EOS R5 packed").
    fn success(&self, message: &str);

    /// Something failed ("Could not add equipment").
    fn error(&self, message: &str);
}

/// Discards every notification.
pub struct NoOpNotifier;

impl Notifier for NoOpNotifier {
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// A notification captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

/// Keeps every notification in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far.
    pub fn events(&self) -> Vec<Notification> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Only the error messages.
    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Error(msg) => Some(msg),
                Notification::Success(_) => None,
            })
            .collect()
    }

    fn push(&self, notification: Notification) {
        if let Ok(mut events) = self.events.lock() {
            events.push(notification);
        }
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.push(Notification::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Notification::Error(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.success("Tripod packed");
        notifier.error("Could not delete equipment");

        assert_eq!(
            notifier.events(),
            vec![
                Notification::Success("Tripod packed".into()),
                Notification::Error("Could not delete equipment".into()),
            ]
        );
        assert_eq!(notifier.errors(), vec!["Could not delete equipment".to_string()]);
    }
}

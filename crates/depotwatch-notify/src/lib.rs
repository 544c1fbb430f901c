use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Rough urgency tag for the delivery channel. The channel decides how to
/// render it (the original surfaces mapped these to embed colors).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Update,
    Alert,
}

/// A platform-agnostic notification. No markup: the delivery surface owns
/// formatting, we own the decision and the content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub severity: Severity,
    /// Free-form audience tag (e.g. a role identifier to ping), if configured.
    pub audience: Option<String>,
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("sink rejected notification: {0}")]
    Rejected(String),
    #[error("sink unavailable: {0}")]
    Unavailable(String),
}

/// Delivery boundary. Implementations talk to the actual messaging surface;
/// the pipeline only ever holds this capability, never a platform client.
pub trait NotifySink: Send + Sync {
    fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError>;
}

/// Writes notifications to the log. Default sink so the daemon runs
/// standalone without any messaging surface attached.
#[derive(Default)]
pub struct LogSink;

impl NotifySink for LogSink {
    fn deliver(&self, n: &Notification) -> Result<(), DeliveryError> {
        info!(
            title = %n.title,
            severity = ?n.severity,
            audience = n.audience.as_deref().unwrap_or("-"),
            "notify: {}",
            n.body
        );
        Ok(())
    }
}

/// Captures notifications for tests.
#[derive(Default)]
pub struct MemorySink {
    delivered: Mutex<Vec<Notification>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> Vec<Notification> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.delivered.lock().unwrap())
    }
}

impl NotifySink for MemorySink {
    fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        self.delivered.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(title: &str) -> Notification {
        Notification {
            title: title.to_string(),
            body: "body".to_string(),
            severity: Severity::Info,
            audience: None,
        }
    }

    #[test]
    fn memory_sink_captures_in_order() {
        let sink = MemorySink::new();
        sink.deliver(&notification("first")).unwrap();
        sink.deliver(&notification("second")).unwrap();
        let got = sink.take();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].title, "first");
        assert_eq!(got[1].title, "second");
        assert!(sink.delivered().is_empty());
    }

    #[test]
    fn log_sink_accepts_everything() {
        let sink = LogSink;
        assert!(sink.deliver(&notification("anything")).is_ok());
    }
}

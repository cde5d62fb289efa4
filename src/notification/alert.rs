//! Operator-facing side effects of a notification.

use tokio::sync::mpsc;

use crate::model::notification::NotificationEvent;

/// One thing the operator sees or hears.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// In-app toast.
    Toast { title: String, body: String },
    /// Browser desktop notification.
    Desktop { title: String, body: String },
    /// Notification sound, by asset path.
    Sound(String),
    /// "New Order Alert" banner shown inside the orders page.
    Banner(NotificationEvent),
}

/// Receives alerts from the notification channels.
pub trait AlertSink: Send + Sync {
    fn alert(&self, alert: Alert);
}

/// Forwards alerts over an unbounded channel to whoever renders them.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<Alert>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Alert>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl AlertSink for ChannelSink {
    fn alert(&self, alert: Alert) {
        // A closed receiver means the UI is gone; the alert has nowhere to go.
        let _ = self.sender.send(alert);
    }
}

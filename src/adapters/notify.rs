use crate::domain::model::Notification;
use crate::domain::ports::Notifier;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Forwards notifications to a receiver; dropped receivers are ignored.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        let _ = self.sender.send(notification);
    }
}

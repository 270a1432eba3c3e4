//! Notifier trait and best-effort delivery

use async_trait::async_trait;

/// A message addressed to a chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub chat_id: String,
    pub text: String,
}

impl Notification {
    pub fn new(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
        }
    }
}

/// Trait for sending notifications
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Send a notification
    async fn notify(&self, notification: &Notification) -> crate::Result<()>;
}

/// Deliver a notification, logging the outcome.
///
/// Delivery failures are logged and swallowed. Returns whether the message
/// was accepted by the channel.
pub async fn send_message(notifier: &dyn Notifier, notification: &Notification) -> bool {
    match notifier.notify(notification).await {
        Ok(()) => {
            tracing::info!("Message sent: \"{}\"", notification.text);
            true
        }
        Err(e) => {
            tracing::error!(
                "Error occurred during message sending via '{}': {}",
                notifier.type_name(),
                e
            );
            false
        }
    }
}

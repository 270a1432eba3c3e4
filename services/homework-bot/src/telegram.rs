//! Telegram Bot API notification client

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::TelegramConfig;
use crate::io::HttpClient;
use crate::notifier::{Notification, Notifier};

/// Sends messages through the Telegram Bot API `sendMessage` method
pub struct TelegramNotifier {
    send_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier").finish_non_exhaustive()
    }
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig, bot_token: &str, http: Arc<dyn HttpClient>) -> Self {
        let api_url = config.api_url.trim_end_matches('/');
        tracing::debug!("Created TelegramNotifier for {}", api_url);

        Self {
            send_url: format!("{}/bot{}/sendMessage", api_url, bot_token),
            http,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn notify(&self, notification: &Notification) -> crate::Result<()> {
        let params = [
            ("chat_id", notification.chat_id.as_str()),
            ("text", notification.text.as_str()),
        ];

        tracing::debug!("Sending Telegram message to chat {}", notification.chat_id);

        let response = self
            .http
            .post_form(&self.send_url, &params)
            .await
            .map_err(|e| crate::HomeworkBotError::DeliveryFailed(e.to_string()))?;

        if response.status != 200 {
            return Err(crate::HomeworkBotError::DeliveryFailed(format!(
                "Telegram API returned status {}: {}",
                response.status, response.body
            )));
        }

        Ok(())
    }
}

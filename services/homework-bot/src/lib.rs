//! Homework bot - review status notification service
//!
//! Polls the Practicum homework status API, detects review status changes of
//! the latest submission, and forwards them to a Telegram chat.

pub mod config;
pub mod detector;
pub mod engine;
pub mod error;
pub mod io;
pub mod notifier;
pub mod practicum;
pub mod response;
pub mod telegram;
pub mod verdict;

pub use config::{load_config, Config, Credentials};
pub use error::{HomeworkBotError, Result};

use std::sync::Arc;
use std::time::Duration;

use crate::engine::Engine;
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::notifier::Notifier;
use crate::practicum::PracticumClient;
use crate::telegram::TelegramNotifier;

/// Wire the engine from configuration, credentials and an HTTP client
pub fn build_engine(
    config: &Config,
    credentials: &Credentials,
    http: Arc<dyn HttpClient>,
) -> Result<Engine> {
    if config.polling.retry_interval_seconds == 0 {
        return Err(HomeworkBotError::Config(
            "polling.retry_interval_seconds must be greater than zero".to_string(),
        ));
    }

    let client = PracticumClient::new(
        &config.practicum,
        &credentials.practicum_token,
        Arc::clone(&http),
    );
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(
        &config.telegram,
        &credentials.telegram_token,
        http,
    ));

    Ok(Engine::new(
        client,
        notifier,
        credentials.telegram_chat_id.as_str(),
        Duration::from_secs(config.polling.retry_interval_seconds),
    ))
}

/// Run the homework bot with the given configuration. Never returns on
/// success; the process is expected to be killed externally.
pub async fn run(config: Config, credentials: Credentials) -> Result<()> {
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    let mut engine = build_engine(&config, &credentials, http)?;

    tracing::info!("Homework bot started");
    engine.run().await;

    Ok(())
}

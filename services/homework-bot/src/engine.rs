//! Engine: the poll, evaluate, notify loop

use std::sync::Arc;
use std::time::Duration;

use crate::detector;
use crate::notifier::{send_message, Notification, Notifier};
use crate::practicum::PracticumClient;
use crate::response;

/// What a single poll cycle ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A status change message was handed to the notifier
    Notified(String),
    /// Nothing changed since the last cursor
    NoChange,
    /// The cycle failed; `reported` is false when the crash report was a
    /// repeat of the previous one and got suppressed
    Failed { message: String, reported: bool },
}

/// Drives the fetch, validate, detect, notify cycle.
///
/// Owns the time cursor and the last crash report sent, so a repeated
/// failure is only reported once.
#[derive(Debug)]
pub struct Engine {
    client: PracticumClient,
    notifier: Arc<dyn Notifier>,
    chat_id: String,
    retry_interval: Duration,
    cursor: i64,
    last_message: Option<String>,
}

impl Engine {
    pub fn new(
        client: PracticumClient,
        notifier: Arc<dyn Notifier>,
        chat_id: impl Into<String>,
        retry_interval: Duration,
    ) -> Self {
        Self {
            client,
            notifier,
            chat_id: chat_id.into(),
            retry_interval,
            cursor: current_epoch_secs(),
            last_message: None,
        }
    }

    /// Override the starting time cursor
    pub fn with_cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }

    /// Lower bound used for the next fetch
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// The last crash report that was sent, if any
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Poll forever. Recoverable errors never end the loop; the sleep between
    /// cycles is not interruptible.
    pub async fn run(&mut self) {
        tracing::info!(
            "Polling every {}s starting from {}",
            self.retry_interval.as_secs(),
            self.cursor
        );
        loop {
            let outcome = self.run_cycle().await;
            tracing::debug!("Cycle finished: {:?}, next from_date={}", outcome, self.cursor);
            tokio::time::sleep(self.retry_interval).await;
        }
    }

    /// Run one cycle without the trailing sleep and advance the cursor
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let outcome = match self.check_homeworks().await {
            Ok(Some(message)) => {
                self.send(&message).await;
                CycleOutcome::Notified(message)
            }
            Ok(None) => CycleOutcome::NoChange,
            Err(e) => {
                let message = format!("Program crash: {}", e);
                tracing::error!("{}", message);
                let reported = self.last_message.as_deref() != Some(message.as_str());
                if reported {
                    self.send(&message).await;
                    self.last_message = Some(message.clone());
                } else {
                    tracing::debug!("Suppressing repeated crash report");
                }
                CycleOutcome::Failed { message, reported }
            }
        };

        self.cursor = current_epoch_secs();
        outcome
    }

    async fn check_homeworks(&self) -> crate::Result<Option<String>> {
        let raw = self.client.fetch(self.cursor).await?;
        let homeworks = response::check_response(&raw)?;
        detector::detect(&homeworks)
    }

    async fn send(&self, text: &str) {
        let notification = Notification::new(self.chat_id.as_str(), text);
        send_message(self.notifier.as_ref(), &notification).await;
    }
}

fn current_epoch_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

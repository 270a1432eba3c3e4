//! Client for the Practicum homework status API

use std::sync::Arc;

use serde_json::Value;

use crate::config::PracticumConfig;
use crate::io::HttpClient;
use crate::HomeworkBotError;

/// Fetches homework statuses changed since a given timestamp
pub struct PracticumClient {
    endpoint: String,
    auth_header: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(config: &PracticumConfig, token: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", config.endpoint);

        Self {
            endpoint: config.endpoint.clone(),
            auth_header: format!("OAuth {}", token),
            http,
        }
    }

    /// Fetch the raw API answer for homeworks updated since `from_date`.
    ///
    /// Transport errors and non-200 answers become `FetchFailed`; a 200 with
    /// a body that is not JSON is a `MalformedResponse`.
    pub async fn fetch(&self, from_date: i64) -> crate::Result<Value> {
        let from_date = from_date.to_string();
        let response = self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", self.auth_header.as_str())],
                &[("from_date", from_date.as_str())],
            )
            .await
            .map_err(|e| {
                HomeworkBotError::FetchFailed(format!("API endpoint is not reachable: {}", e))
            })?;

        if response.status != 200 {
            let message = format!(
                "API endpoint is not available, server response code: {}",
                response.status
            );
            tracing::error!("{}", message);
            return Err(HomeworkBotError::FetchFailed(message));
        }

        serde_json::from_str(&response.body).map_err(|e| {
            HomeworkBotError::MalformedResponse(format!("response body is not JSON: {}", e))
        })
    }
}

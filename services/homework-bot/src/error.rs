//! Error types for the homework bot

/// Errors that can occur in the homework bot
#[derive(Debug, thiserror::Error)]
pub enum HomeworkBotError {
    /// One or more credential environment variables are unset or empty.
    /// Only raised at startup.
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure or non-200 answer from the review API
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),

    /// Notification could not be delivered. Swallowed by `send_message`.
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for homework bot operations
pub type Result<T> = std::result::Result<T, HomeworkBotError>;

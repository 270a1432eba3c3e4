//! Decoding and validation of review API responses
//!
//! A response is accepted when `homeworks` is a list; its elements are left
//! as raw JSON until the detector reads the newest one with
//! [`HomeworkRecord::from_value`]. `current_date` is optional and only logged
//! when absent.

use serde_json::Value;

use crate::error::HomeworkBotError;

/// A single homework submission as reported by the review API
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub homework_name: String,
    /// Raw status code; validated against the catalog by the detector
    pub status: String,
}

impl HomeworkRecord {
    /// Read a record from a `homeworks` element.
    ///
    /// Only the element itself has to be an object. A non-string
    /// `homework_name` is rendered as JSON; a missing or non-string `status`
    /// becomes an empty code, which the catalog rejects.
    pub fn from_value(item: &Value) -> crate::Result<Self> {
        let object = item.as_object().ok_or_else(|| {
            HomeworkBotError::MalformedResponse(format!(
                "homework is not an object (got {})",
                json_type(item)
            ))
        })?;

        let homework_name = match object.get("homework_name") {
            Some(Value::String(name)) => name.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        let status = object
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            homework_name,
            status,
        })
    }
}

/// Decoded review API response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// Newest first, undecoded
    pub homeworks: Vec<Value>,
    pub current_date: Option<i64>,
}

/// Decode a raw JSON document into an `ApiResponse`
pub fn decode(raw: &Value) -> crate::Result<ApiResponse> {
    let object = raw.as_object().ok_or_else(|| {
        HomeworkBotError::MalformedResponse(format!(
            "expected a JSON object, got {}",
            json_type(raw)
        ))
    })?;

    let homeworks = match object.get("homeworks") {
        Some(Value::Array(items)) => items.clone(),
        Some(other) => {
            return Err(HomeworkBotError::MalformedResponse(format!(
                "\"homeworks\" is not a list (got {})",
                json_type(other)
            )))
        }
        None => {
            return Err(HomeworkBotError::MalformedResponse(
                "\"homeworks\" is not a list (key missing)".to_string(),
            ))
        }
    };

    let current_date = object.get("current_date").and_then(Value::as_i64);
    if !object.contains_key("current_date") {
        tracing::warn!("API response does not have expected key \"current_date\"");
    }

    Ok(ApiResponse {
        homeworks,
        current_date,
    })
}

/// Validate a raw response and return its homework list
pub fn check_response(raw: &Value) -> crate::Result<Vec<Value>> {
    decode(raw).map(|response| response.homeworks)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

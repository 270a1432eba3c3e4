//! Status change detection for the most recent homework

use serde_json::Value;

use crate::response::HomeworkRecord;
use crate::verdict;

/// Compose the notification text for a single homework record
pub fn parse_status(homework: &HomeworkRecord) -> crate::Result<String> {
    let verdict = verdict::lookup(&homework.status)?;
    Ok(format!(
        "Homework status changed \"{}\". {}",
        homework.homework_name, verdict
    ))
}

/// Inspect the newest homework and return the message to send, if any.
///
/// Only the first element is decoded; the API returns newest first and older
/// entries are never looked at.
pub fn detect(homeworks: &[Value]) -> crate::Result<Option<String>> {
    match homeworks.first() {
        Some(newest) => parse_status(&HomeworkRecord::from_value(newest)?).map(Some),
        None => {
            tracing::debug!("Homework status did not change");
            Ok(None)
        }
    }
}

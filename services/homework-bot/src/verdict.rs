//! Review status codes and their verdict texts

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HomeworkBotError;

/// Review status of a homework submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    /// The status code as sent by the review API
    pub fn code(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Human-readable verdict for this status
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Homework checked: reviewer approved it. Hooray!",
            HomeworkStatus::Reviewing => "Reviewer started checking homework",
            HomeworkStatus::Rejected => "Homework checked: reviewer has comments",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for HomeworkStatus {
    type Err = HomeworkBotError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        HomeworkStatus::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .ok_or_else(|| HomeworkBotError::UnknownStatus(code.to_string()))
    }
}

/// Look up the verdict text for a raw status code
pub fn lookup(code: &str) -> crate::Result<&'static str> {
    code.parse::<HomeworkStatus>().map(|status| status.verdict())
}

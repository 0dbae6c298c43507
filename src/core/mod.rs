pub mod errors;
pub mod status;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::core::errors::{Error, Result};

/// Severity grade of a defect. The numeric values mirror the bit-style
/// grades used by upstream tool payloads (serious = 1, normal = 2,
/// prompt = 4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Serious,
    Normal,
    Prompt,
}

impl Severity {
    /// Numeric grade carried in tool payloads.
    pub fn value(self) -> u32 {
        match self {
            Severity::Serious => 1,
            Severity::Normal => 2,
            Severity::Prompt => 4,
        }
    }

    pub fn from_value(value: u32) -> Option<Self> {
        match value {
            1 => Some(Severity::Serious),
            2 => Some(Severity::Normal),
            4 => Some(Severity::Prompt),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Serious => "serious",
            Severity::Normal => "normal",
            Severity::Prompt => "prompt",
        };
        write!(f, "{}", label)
    }
}

/// Why a user suppressed a defect. Only meaningful alongside the
/// `IGNORE` status flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IgnoreReason {
    FalsePositive,
    WontFix,
    Other,
}

/// Age bucket relative to a task's new-defect judge time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DefectAgeClass {
    New,
    History,
}

/// One defect reported by an analysis tool.
///
/// Timestamps are epoch milliseconds; zero means the event never
/// happened (a never-fixed defect has `fixed_time == 0`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectRecord {
    pub id: String,
    pub task_id: i64,
    pub tool_name: String,
    pub checker_name: String,
    #[serde(default)]
    pub authors: BTreeSet<String>,
    pub file_pathname: String,
    pub severity: Severity,
    pub status: u32,
    #[serde(default)]
    pub ignore_reason: Option<IgnoreReason>,
    #[serde(default)]
    pub create_time: i64,
    #[serde(default)]
    pub fixed_time: i64,
    #[serde(default)]
    pub exclude_time: i64,
    #[serde(default)]
    pub ignore_time: i64,
    #[serde(default)]
    pub file_version: Option<String>,
}

impl DefectRecord {
    pub fn new(
        id: impl Into<String>,
        task_id: i64,
        tool_name: impl Into<String>,
        checker_name: impl Into<String>,
        file_pathname: impl Into<String>,
        severity: Severity,
        status: u32,
    ) -> Self {
        Self {
            id: id.into(),
            task_id,
            tool_name: tool_name.into(),
            checker_name: checker_name.into(),
            authors: BTreeSet::new(),
            file_pathname: file_pathname.into(),
            severity,
            status,
            ignore_reason: None,
            create_time: 0,
            fixed_time: 0,
            exclude_time: 0,
            ignore_time: 0,
            file_version: None,
        }
    }

    /// Check the record against the status model.
    pub fn validate(&self) -> Result<()> {
        status::validate(self.status)?;
        if self.ignore_reason.is_some() && !status::is_ignored(self.status) {
            return Err(Error::Validation(format!(
                "defect {} carries an ignore reason without the IGNORE flag",
                self.id
            )));
        }
        Ok(())
    }

    /// Records created strictly after the judge time are new; everything
    /// else, including every record when no judge time is known, is
    /// history.
    pub fn age_class(&self, judge_time: Option<i64>) -> DefectAgeClass {
        match judge_time {
            Some(judge) if self.create_time > judge => DefectAgeClass::New,
            _ => DefectAgeClass::History,
        }
    }
}

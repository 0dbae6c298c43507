//! Query condition model and its compiled form.
//!
//! Conditions arrive as loosely-typed payloads from the dashboard: any
//! field may be absent, empty strings mean "not filtering on this", and
//! date bounds are `YYYY-MM-DD` strings. [`QueryCondition::compile`]
//! resolves the loose parts once per query so the per-record predicates
//! stay cheap.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::errors::{Error, Result};
use crate::core::status::CoarseStatus;
use crate::core::{DefectAgeClass, Severity};

/// Filter condition for one defect query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryCondition {
    pub checker: Option<String>,
    pub author: Option<String>,
    pub file_list: BTreeSet<String>,
    pub severity_set: BTreeSet<Severity>,
    pub status_set: BTreeSet<CoarseStatus>,
    pub defect_type_set: BTreeSet<DefectAgeClass>,
    pub build_id: Option<String>,
    pub start_create_time: Option<String>,
    pub end_create_time: Option<String>,
    pub start_fix_time: Option<String>,
    pub end_fix_time: Option<String>,
}

impl QueryCondition {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Status buckets the dashboard shows when the user picked none.
    pub fn default_status_filter() -> BTreeSet<CoarseStatus> {
        [CoarseStatus::New, CoarseStatus::Fixed, CoarseStatus::Ignored]
            .into_iter()
            .collect()
    }

    /// The effective status filter: the requested set, or the default
    /// when the request left it empty.
    pub fn status_filter(&self) -> BTreeSet<CoarseStatus> {
        if self.status_set.is_empty() {
            Self::default_status_filter()
        } else {
            self.status_set.clone()
        }
    }

    pub fn checker_filter(&self) -> Option<&str> {
        non_empty(&self.checker)
    }

    pub fn author_filter(&self) -> Option<&str> {
        non_empty(&self.author)
    }

    pub fn build_filter(&self) -> Option<&str> {
        non_empty(&self.build_id)
    }

    /// Resolve defaults and parse date bounds. Fails fast on a malformed
    /// bound instead of silently filtering everything out.
    pub fn compile(&self) -> Result<CompiledCondition> {
        Ok(CompiledCondition {
            status_filter: self.status_filter(),
            create_range: TimeRange::from_bounds(
                non_empty(&self.start_create_time),
                non_empty(&self.end_create_time),
            )?,
            fix_range: TimeRange::from_bounds(
                non_empty(&self.start_fix_time),
                non_empty(&self.end_fix_time),
            )?,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Per-query values derived once from a [`QueryCondition`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledCondition {
    pub status_filter: BTreeSet<CoarseStatus>,
    pub create_range: TimeRange,
    pub fix_range: TimeRange,
}

/// Half-open timestamp window in epoch milliseconds.
///
/// `start` is inclusive and `end` exclusive; either bound may be absent.
/// A date bound `YYYY-MM-DD` maps to UTC midnight, the end bound to
/// midnight of the following day so the named day is fully covered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl TimeRange {
    pub fn from_bounds(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        let start = match start {
            Some(raw) => Some(day_start_millis(raw)?),
            None => None,
        };
        let end = match end {
            Some(raw) => Some(day_end_millis(raw)?),
            None => None,
        };
        Ok(Self { start, end })
    }

    /// True when at least one bound is set.
    pub fn is_active(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// True when an active range rules the timestamp out. A zero
    /// timestamp means the event never happened, so any active range
    /// excludes it.
    pub fn excludes(&self, timestamp: i64) -> bool {
        if !self.is_active() {
            return false;
        }
        if timestamp == 0 {
            return true;
        }
        if self.start.is_some_and(|start| timestamp < start) {
            return true;
        }
        self.end.is_some_and(|end| timestamp >= end)
    }
}

fn parse_day(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| Error::Configuration(format!("invalid date bound {:?}: {}", raw, e)))
}

fn day_start_millis(raw: &str) -> Result<i64> {
    Ok(parse_day(raw)?
        .and_time(NaiveTime::MIN)
        .and_utc()
        .timestamp_millis())
}

fn day_end_millis(raw: &str) -> Result<i64> {
    let next_day = parse_day(raw)?
        .succ_opt()
        .ok_or_else(|| Error::Configuration(format!("date bound {:?} is out of range", raw)))?;
    Ok(next_day.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DAY: i64 = 24 * 60 * 60 * 1000;

    #[test]
    fn test_status_filter_defaults_to_visible_buckets() {
        let condition = QueryCondition::default();
        assert_eq!(condition.status_filter(), QueryCondition::default_status_filter());

        let condition = QueryCondition {
            status_set: [CoarseStatus::Excluded].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(
            condition.status_filter(),
            [CoarseStatus::Excluded].into_iter().collect()
        );
    }

    #[test]
    fn test_empty_strings_mean_absent() {
        let condition = QueryCondition {
            checker: Some(String::new()),
            author: Some("alice".to_string()),
            build_id: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(condition.checker_filter(), None);
        assert_eq!(condition.author_filter(), Some("alice"));
        assert_eq!(condition.build_filter(), None);
    }

    #[test]
    fn test_date_bounds_cover_named_days() {
        let range =
            TimeRange::from_bounds(Some("1970-01-02"), Some("1970-01-02")).unwrap();
        assert_eq!(range.start, Some(DAY));
        assert_eq!(range.end, Some(2 * DAY));

        // The whole named day is inside the range.
        assert!(range.excludes(DAY - 1));
        assert!(!range.excludes(DAY));
        assert!(!range.excludes(2 * DAY - 1));
        assert!(range.excludes(2 * DAY));
    }

    #[test]
    fn test_malformed_date_bound_is_a_configuration_error() {
        let condition = QueryCondition {
            start_create_time: Some("03/05/2024".to_string()),
            ..Default::default()
        };
        let err = condition.compile().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_empty_date_strings_leave_range_inactive() {
        let condition = QueryCondition {
            start_create_time: Some(String::new()),
            end_create_time: Some(String::new()),
            ..Default::default()
        };
        let compiled = condition.compile().unwrap();
        assert!(!compiled.create_range.is_active());
        assert!(!compiled.create_range.excludes(0));
    }

    #[test]
    fn test_zero_timestamp_is_excluded_by_any_active_range() {
        let start_only = TimeRange { start: Some(DAY), end: None };
        let end_only = TimeRange { start: None, end: Some(DAY) };
        assert!(start_only.excludes(0));
        assert!(end_only.excludes(0));

        let inactive = TimeRange::default();
        assert!(!inactive.excludes(0));
    }

    #[test]
    fn test_condition_round_trips_through_json() {
        let raw = r#"{
            "checker": "NULL_RETURNS",
            "severity_set": ["SERIOUS", "NORMAL"],
            "status_set": ["NEW"],
            "defect_type_set": ["HISTORY"],
            "start_create_time": "2024-03-01"
        }"#;
        let condition = QueryCondition::from_json_str(raw).unwrap();
        assert_eq!(condition.checker_filter(), Some("NULL_RETURNS"));
        assert_eq!(condition.severity_set.len(), 2);
        assert!(condition.status_set.contains(&CoarseStatus::New));
        assert!(condition.defect_type_set.contains(&DefectAgeClass::History));
        assert!(condition.author.is_none());

        let back = QueryCondition::from_json_str(
            &serde_json::to_string(&condition).unwrap(),
        )
        .unwrap();
        assert_eq!(back, condition);
    }
}

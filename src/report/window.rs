//! Per-task defect statistics over a reporting window.
//!
//! Windows are half-open the other way round from query time ranges:
//! `(start, end]`. An event on the window's start instant belongs to the
//! previous reporting period, one on the end instant to this period.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::errors::{Error, Result};
use crate::core::status;
use crate::core::DefectRecord;
use crate::query::aggregation::SeverityCounter;

pub const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// `(start, end]` reporting window with a staleness threshold in days.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    pub start_time: i64,
    pub end_time: i64,
    pub timeout_days: i64,
}

impl ReportWindow {
    pub fn new(start_time: i64, end_time: i64, timeout_days: i64) -> Result<Self> {
        if start_time > end_time {
            return Err(Error::Configuration(format!(
                "report window starts at {} but ends at {}",
                start_time, end_time
            )));
        }
        if timeout_days < 0 {
            return Err(Error::Configuration(format!(
                "timeout threshold must be non-negative, got {} days",
                timeout_days
            )));
        }
        Ok(Self {
            start_time,
            end_time,
            timeout_days,
        })
    }

    /// True when the event timestamp falls inside `(start, end]`. A zero
    /// timestamp never does (for any non-negative start), so absent
    /// events stay out of the tallies without a separate check.
    #[inline]
    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp > self.start_time && timestamp <= self.end_time
    }

    /// True when a defect created at `create_time` has been open longer
    /// than the timeout threshold by the end of the window.
    #[inline]
    pub fn is_timed_out(&self, create_time: i64) -> bool {
        self.end_time - create_time > self.timeout_days * DAY_MILLIS
    }
}

/// Window statistics for one task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskWindowStats {
    /// Defects first reported inside the window, masked ones excluded.
    pub new_add: SeverityCounter,
    /// Defects repaired inside the window.
    pub fixed: SeverityCounter,
    /// Defects still open at the window's end.
    pub exist: SeverityCounter,
    /// Open defects that exceeded the timeout threshold.
    pub timeout_count: usize,
}

/// Compute window statistics for one task's defect list.
///
/// A record can land in several tallies: a defect created and fixed in
/// the same window counts as both new and fixed.
pub fn task_window_stats(defects: &[DefectRecord], window: &ReportWindow) -> TaskWindowStats {
    let mut stats = TaskWindowStats::default();
    for defect in defects {
        if window.contains(defect.create_time)
            && !status::is_ignored(defect.status)
            && !status::is_excluded(defect.status)
        {
            stats.new_add.record(defect.severity);
        }
        if window.contains(defect.fixed_time) && status::is_fixed(defect.status) {
            stats.fixed.record(defect.severity);
        }
        if defect.create_time <= window.end_time && status::is_new(defect.status) {
            stats.exist.record(defect.severity);
            if window.is_timed_out(defect.create_time) {
                stats.timeout_count += 1;
            }
        }
    }
    stats
}

/// Compute window statistics for every task, fanned out across tasks.
pub fn window_report(
    defects_by_task: &BTreeMap<i64, Vec<DefectRecord>>,
    window: &ReportWindow,
) -> BTreeMap<i64, TaskWindowStats> {
    defects_by_task
        .par_iter()
        .map(|(task_id, defects)| (*task_id, task_window_stats(defects, window)))
        .collect()
}

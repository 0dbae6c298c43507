pub mod rollup;
pub mod window;

pub use rollup::{outstanding_defects, status_rollup, TaskStatusRollup};
pub use window::{task_window_stats, window_report, ReportWindow, TaskWindowStats, DAY_MILLIS};

use std::collections::BTreeMap;

use crate::core::DefectRecord;

/// Group a mixed defect list by owning task, preserving each task's
/// input order.
pub fn group_by_task(defects: Vec<DefectRecord>) -> BTreeMap<i64, Vec<DefectRecord>> {
    let mut by_task: BTreeMap<i64, Vec<DefectRecord>> = BTreeMap::new();
    for defect in defects {
        by_task.entry(defect.task_id).or_default().push(defect);
    }
    by_task
}

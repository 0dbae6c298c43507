//! Lifecycle rollups for task overview widgets.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::core::status::{self, CoarseStatus};
use crate::core::{DefectRecord, IgnoreReason, Severity};
use crate::query::aggregation::SeverityCounter;

/// Lifecycle breakdown of one task's defects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatusRollup {
    /// Open defects by severity.
    pub exist: SeverityCounter,
    /// Repaired defects by severity.
    pub fixed: SeverityCounter,
    /// Suppressed defects by reason. Records missing a reason land in
    /// [`IgnoreReason::Other`].
    pub ignored: BTreeMap<IgnoreReason, usize>,
    /// Defects masked by path or checker configuration, by severity.
    pub excluded: SeverityCounter,
}

impl TaskStatusRollup {
    pub fn ignored_total(&self) -> usize {
        self.ignored.values().sum()
    }

    pub fn total(&self) -> usize {
        self.exist.total + self.fixed.total + self.ignored_total() + self.excluded.total
    }
}

/// Roll one task's defects up into lifecycle buckets.
///
/// `checker_scope` optionally limits the rollup to a checker package;
/// its entries are matched against the uppercased checker name. Each
/// record lands in exactly one bucket, resolved by the status model's
/// priority order.
pub fn status_rollup(
    defects: &[DefectRecord],
    checker_scope: Option<&HashSet<String>>,
) -> TaskStatusRollup {
    let mut rollup = TaskStatusRollup::default();
    for defect in defects {
        if let Some(scope) = checker_scope {
            if !scope.contains(&defect.checker_name.to_uppercase()) {
                continue;
            }
        }
        match status::classify(defect.status) {
            Some(CoarseStatus::New) => rollup.exist.record(defect.severity),
            Some(CoarseStatus::Fixed) => rollup.fixed.record(defect.severity),
            Some(CoarseStatus::Ignored) => {
                let reason = defect.ignore_reason.unwrap_or(IgnoreReason::Other);
                *rollup.ignored.entry(reason).or_insert(0) += 1;
            }
            Some(CoarseStatus::Excluded) => rollup.excluded.record(defect.severity),
            None => {}
        }
    }
    rollup
}

/// Keep the defects still open at the end of a reporting period,
/// optionally narrowed to one severity grade. Input order is preserved
/// so the caller can hand the slice straight to sorting and paging.
pub fn outstanding_defects(
    defects: Vec<DefectRecord>,
    severity: Option<Severity>,
    end_time: i64,
) -> Vec<DefectRecord> {
    defects
        .into_iter()
        .filter(|defect| {
            severity.is_none_or(|grade| defect.severity == grade)
                && defect.create_time <= end_time
                && status::is_new(defect.status)
        })
        .collect()
}

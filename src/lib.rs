// Export modules for library usage
pub mod core;
pub mod paging;
pub mod paths;
pub mod query;
pub mod report;

// Re-export commonly used types
pub use crate::core::errors::{Error, Result, ResultExt};
pub use crate::core::status::{self, CoarseStatus};
pub use crate::core::{DefectAgeClass, DefectRecord, IgnoreReason, Severity};

pub use crate::paging::{
    paginate, sort_and_page, sort_defects, Page, PageRequest, SortDirection, SortField,
    DEFAULT_PAGE_SIZE,
};

pub use crate::query::{
    aggregation::{DefectAggregates, SeverityCounter},
    condition::{CompiledCondition, QueryCondition, TimeRange},
    pipeline::{filter_and_aggregate, FilterOutcome},
};

pub use crate::report::{
    group_by_task,
    rollup::{outstanding_defects, status_rollup, TaskStatusRollup},
    window::{task_window_stats, window_report, ReportWindow, TaskWindowStats, DAY_MILLIS},
};

//! Pure rejection predicates for defect filtering.
//!
//! Each predicate answers "does this condition rule the record out?" so
//! the pipeline reads as a sequence of early returns. Predicates never
//! mutate counters; ordering and bookkeeping live in
//! [`pipeline`](crate::query::pipeline).

use std::collections::{BTreeSet, HashSet};

use crate::core::status::{self, CoarseStatus};
use crate::core::{DefectAgeClass, DefectRecord, Severity};
use crate::paths;
use crate::query::condition::TimeRange;

/// Reject records absent from the build's defect snapshot.
///
/// Only meaningful while a build filter is active. `None` means the
/// snapshot for the requested build never synced, which rejects every
/// record rather than silently showing an unfiltered list.
#[inline]
pub fn reject_by_build(record: &DefectRecord, membership: Option<&HashSet<String>>) -> bool {
    match membership {
        Some(ids) => !ids.contains(&record.id),
        None => true,
    }
}

/// Reject records whose checker differs from the requested one.
#[inline]
pub fn reject_by_checker(record: &DefectRecord, checker: Option<&str>) -> bool {
    checker.is_some_and(|requested| requested != record.checker_name)
}

/// Reject records none of whose authors is the requested author.
#[inline]
pub fn reject_by_author(record: &DefectRecord, author: Option<&str>) -> bool {
    author.is_some_and(|requested| !record.authors.contains(requested))
}

/// Reject records whose file path matches no entry of a non-empty mask
/// set. An empty set filters nothing.
#[inline]
pub fn reject_by_file_path(record: &DefectRecord, file_list: &BTreeSet<String>) -> bool {
    !file_list.is_empty() && !paths::matches_any_mask(&record.file_pathname, file_list)
}

#[inline]
pub fn reject_by_create_time(record: &DefectRecord, range: &TimeRange) -> bool {
    range.excludes(record.create_time)
}

#[inline]
pub fn reject_by_fix_time(record: &DefectRecord, range: &TimeRange) -> bool {
    range.excludes(record.fixed_time)
}

/// Reject records whose coarse status bucket was not requested.
#[inline]
pub fn reject_by_status(record: &DefectRecord, requested: &BTreeSet<CoarseStatus>) -> bool {
    !status::matches_filter(record.status, requested)
}

/// Reject records outside a non-empty severity set. An empty set
/// filters nothing.
#[inline]
pub fn reject_by_severity(record: &DefectRecord, severity_set: &BTreeSet<Severity>) -> bool {
    !severity_set.is_empty() && !severity_set.contains(&record.severity)
}

/// Reject records whose age bucket (relative to the judge time) is
/// outside a non-empty age set. An empty set filters nothing.
#[inline]
pub fn reject_by_age_class(
    record: &DefectRecord,
    requested: &BTreeSet<DefectAgeClass>,
    judge_time: Option<i64>,
) -> bool {
    !requested.is_empty() && !requested.contains(&record.age_class(judge_time))
}

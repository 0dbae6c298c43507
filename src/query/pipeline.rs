//! Single-pass defect filtering and aggregation.
//!
//! One traversal applies every condition of a query and fills every
//! sidebar counter. Stage order is load-bearing: each counter family is
//! tied to a fixed point in the rejection chain so that a facet's own
//! filter never changes the totals shown for that facet.
//!
//! * Checker and author histograms and the affected-path set observe
//!   every record whose status matches the requested buckets, before any
//!   scoping filter runs.
//! * The coarse exist/fix/ignore tallies observe records that passed the
//!   scoping filters (build, checker, author, path, time ranges) but not
//!   yet the status filter.
//! * Severity tallies observe records that additionally passed the
//!   status filter; age tallies additionally the severity filter.
//! * `total_count` counts only full survivors.

use std::collections::{BTreeSet, HashSet};

use crate::core::errors::Result;
use crate::core::DefectRecord;
use crate::query::aggregation::DefectAggregates;
use crate::query::condition::QueryCondition;
use crate::query::predicates;

/// Everything produced by one filter pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Records that passed every filter, in input order.
    pub survivors: Vec<DefectRecord>,
    pub aggregates: DefectAggregates,
    /// File paths of status-matching records, before scoping filters.
    pub affected_paths: BTreeSet<String>,
}

/// Filters defects against a query condition while filling the sidebar
/// counters, in one pass.
///
/// # Arguments
///
/// * `defects` - Candidate records, already scoped to the task and tool
/// * `condition` - The query condition as sent by the dashboard
/// * `build_membership` - Defect ids present in the requested build's
///   snapshot; only consulted when the condition carries a build id, and
///   `None` then means the snapshot never synced, so nothing matches
/// * `new_defect_judge_time` - Task baseline for the new/history split;
///   `None` classifies every record as history
///
/// Fails fast with a configuration error when a date bound in the
/// condition cannot be parsed.
///
/// # Examples
///
/// ```no_run
/// use defectview::{filter_and_aggregate, DefectRecord, QueryCondition};
///
/// # let defects: Vec<DefectRecord> = vec![];
/// let condition = QueryCondition::default();
/// let outcome = filter_and_aggregate(defects, &condition, None, None)?;
/// println!(
///     "kept {} of {} status-matching checkers",
///     outcome.aggregates.total_count,
///     outcome.aggregates.checker_histogram.len(),
/// );
/// # Ok::<(), defectview::Error>(())
/// ```
pub fn filter_and_aggregate(
    defects: Vec<DefectRecord>,
    condition: &QueryCondition,
    build_membership: Option<&HashSet<String>>,
    new_defect_judge_time: Option<i64>,
) -> Result<FilterOutcome> {
    let compiled = condition.compile()?;
    let checker = condition.checker_filter();
    let author = condition.author_filter();
    let build_filter_active = condition.build_filter().is_some();
    if build_filter_active && build_membership.is_none() {
        log::warn!(
            "no defect snapshot for build {:?}, rejecting all records",
            condition.build_filter()
        );
    }

    let total = defects.len();
    let mut aggregates = DefectAggregates::new(new_defect_judge_time);
    let mut affected_paths = BTreeSet::new();

    let survivors: Vec<DefectRecord> = defects
        .into_iter()
        .filter_map(|record| {
            // Status bookkeeping first: the histogram facets and the
            // affected-path set see every status-matching candidate,
            // even ones a scoping filter drops next.
            let status_rejected = predicates::reject_by_status(&record, &compiled.status_filter);
            if !status_rejected {
                aggregates.note_status_match(&record);
                affected_paths.insert(record.file_pathname.clone());
            }

            // Scoping filters.
            if build_filter_active && predicates::reject_by_build(&record, build_membership) {
                return None;
            }
            if predicates::reject_by_checker(&record, checker) {
                return None;
            }
            if predicates::reject_by_author(&record, author) {
                return None;
            }
            if predicates::reject_by_file_path(&record, &condition.file_list) {
                return None;
            }
            if predicates::reject_by_create_time(&record, &compiled.create_range) {
                return None;
            }
            if predicates::reject_by_fix_time(&record, &compiled.fix_range) {
                return None;
            }

            // Coarse lifecycle tallies cover every record in scope, so
            // they precede the status rejection they sum over.
            aggregates.record_coarse(record.status);
            if status_rejected {
                return None;
            }

            // Severity tallies likewise precede the severity filter.
            aggregates.record_severity(record.severity);
            if predicates::reject_by_severity(&record, &condition.severity_set) {
                return None;
            }

            // Same again for the new/history tallies and filter.
            aggregates.record_age(record.age_class(new_defect_judge_time));
            if predicates::reject_by_age_class(
                &record,
                &condition.defect_type_set,
                new_defect_judge_time,
            ) {
                return None;
            }

            aggregates.total_count += 1;
            Some(record)
        })
        .collect();

    log::debug!("kept {} of {} defects", survivors.len(), total);

    Ok(FilterOutcome {
        survivors,
        aggregates,
        affected_paths,
    })
}

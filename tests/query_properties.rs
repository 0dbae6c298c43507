//! Property-based tests for the filter/aggregate/page engine.
//!
//! These verify invariants that should hold for all inputs:
//! - Survivor count and the total counter always agree
//! - Counter families are independent of the filters downstream of them
//! - Survivors are a subsequence of the input
//! - Pagination is idempotent and never overflows the page size
//! - Status classification is deterministic under the priority order

use defectview::{
    filter_and_aggregate, paginate, status, CoarseStatus, DefectRecord, QueryCondition, Severity,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Well-formed status masks a defect can actually carry.
fn status_mask() -> impl Strategy<Value = u32> {
    prop_oneof![
        Just(status::NEW),
        Just(status::FIXED),
        Just(status::IGNORE),
        Just(status::PATH_MASK),
        Just(status::CHECKER_MASK),
        Just(status::FIXED | status::IGNORE),
        Just(status::IGNORE | status::CHECKER_MASK),
        Just(status::FIXED | status::PATH_MASK | status::CHECKER_MASK),
    ]
}

fn severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Serious),
        Just(Severity::Normal),
        Just(Severity::Prompt),
    ]
}

prop_compose! {
    fn arb_defect(index: usize)(
        status_mask in status_mask(),
        severity in severity(),
        checker in "[A-Z_]{4,12}",
        author in "[a-z]{3,8}",
        create_time in 0i64..1_000_000,
        fixed_time in 0i64..1_000_000,
    ) -> DefectRecord {
        let mut record = DefectRecord::new(
            format!("d{}", index),
            42,
            "COVERITY",
            checker,
            format!("/src/file{}.c", index % 7),
            severity,
            status_mask,
        );
        record.authors.insert(author);
        record.create_time = create_time;
        record.fixed_time = fixed_time;
        record
    }
}

fn arb_defects() -> impl Strategy<Value = Vec<DefectRecord>> {
    prop::collection::vec(0usize..64, 0..40).prop_flat_map(|indices| {
        indices
            .into_iter()
            .map(arb_defect)
            .collect::<Vec<_>>()
    })
}

fn arb_status_set() -> impl Strategy<Value = BTreeSet<CoarseStatus>> {
    prop::collection::btree_set(
        prop_oneof![
            Just(CoarseStatus::New),
            Just(CoarseStatus::Fixed),
            Just(CoarseStatus::Ignored),
            Just(CoarseStatus::Excluded),
        ],
        0..4,
    )
}

proptest! {
    /// Property: the total counter counts exactly the survivors.
    #[test]
    fn prop_total_count_matches_survivors(
        defects in arb_defects(),
        status_set in arb_status_set(),
        severity_filter in prop::option::of(severity()),
    ) {
        let condition = QueryCondition {
            status_set,
            severity_set: severity_filter.into_iter().collect(),
            ..Default::default()
        };
        let outcome = filter_and_aggregate(defects, &condition, None, None).unwrap();
        prop_assert_eq!(outcome.aggregates.total_count, outcome.survivors.len());
    }

    /// Property: survivors are a subsequence of the input, never
    /// reordered or duplicated.
    #[test]
    fn prop_survivors_are_an_ordered_subsequence(
        defects in arb_defects(),
        status_set in arb_status_set(),
    ) {
        let condition = QueryCondition { status_set, ..Default::default() };
        let input_ids: Vec<String> = defects.iter().map(|d| d.id.clone()).collect();
        let outcome = filter_and_aggregate(defects, &condition, None, None).unwrap();

        let mut cursor = input_ids.iter();
        for survivor in &outcome.survivors {
            prop_assert!(cursor.any(|id| *id == survivor.id));
        }
    }

    /// Property: the severity tallies ignore the severity filter's own
    /// value.
    #[test]
    fn prop_severity_counts_ignore_severity_filter(
        defects in arb_defects(),
        status_set in arb_status_set(),
        grade in severity(),
    ) {
        let unfiltered = QueryCondition {
            status_set: status_set.clone(),
            ..Default::default()
        };
        let narrowed = QueryCondition {
            severity_set: [grade].into_iter().collect(),
            ..unfiltered.clone()
        };

        let broad = filter_and_aggregate(defects.clone(), &unfiltered, None, None).unwrap();
        let narrow = filter_and_aggregate(defects, &narrowed, None, None).unwrap();

        prop_assert_eq!(broad.aggregates.serious_count, narrow.aggregates.serious_count);
        prop_assert_eq!(broad.aggregates.normal_count, narrow.aggregates.normal_count);
        prop_assert_eq!(broad.aggregates.prompt_count, narrow.aggregates.prompt_count);
    }

    /// Property: checker and author histograms react only to the status
    /// filter, not to checker/author/path/severity scoping.
    #[test]
    fn prop_histograms_ignore_scoping_filters(
        defects in arb_defects(),
        status_set in arb_status_set(),
        checker in prop::option::of("[A-Z_]{4,12}"),
        author in prop::option::of("[a-z]{3,8}"),
        grade in prop::option::of(severity()),
    ) {
        let base = QueryCondition { status_set, ..Default::default() };
        let scoped = QueryCondition {
            checker,
            author,
            severity_set: grade.into_iter().collect(),
            file_list: ["file3".to_string()].into_iter().collect(),
            ..base.clone()
        };

        let baseline = filter_and_aggregate(defects.clone(), &base, None, None).unwrap();
        let filtered = filter_and_aggregate(defects, &scoped, None, None).unwrap();

        prop_assert_eq!(
            baseline.aggregates.checker_histogram,
            filtered.aggregates.checker_histogram
        );
        prop_assert_eq!(
            baseline.aggregates.author_histogram,
            filtered.aggregates.author_histogram
        );
        prop_assert_eq!(baseline.affected_paths, filtered.affected_paths);
    }

    /// Property: pagination is idempotent and the page never exceeds the
    /// requested size.
    #[test]
    fn prop_paginate_is_idempotent_and_bounded(
        len in 0usize..100,
        page_number in -5i64..30,
        page_size in -5i64..25,
    ) {
        let items: Vec<usize> = (0..len).collect();
        let once = paginate(items.clone(), Some(page_number), Some(page_size));
        let again = paginate(items, Some(page_number), Some(page_size));

        prop_assert_eq!(&once, &again);
        prop_assert!(once.records.len() <= once.page_size.max(10));
        prop_assert_eq!(once.total_count, len);
        if once.page_size > 0 {
            prop_assert!(once.records.len() <= once.page_size);
            prop_assert_eq!(once.total_pages, len.div_ceil(once.page_size));
        }
    }

    /// Property: classification is total over well-formed masks and
    /// deterministic.
    #[test]
    fn prop_classification_is_deterministic(mask in status_mask()) {
        let first = status::classify(mask);
        let second = status::classify(mask);
        prop_assert_eq!(first, second);
        prop_assert!(first.is_some());

        if status::is_new(mask) {
            prop_assert_eq!(first, Some(CoarseStatus::New));
        } else if status::is_fixed(mask) {
            prop_assert_eq!(first, Some(CoarseStatus::Fixed));
        } else if status::is_ignored(mask) {
            prop_assert_eq!(first, Some(CoarseStatus::Ignored));
        }
    }
}

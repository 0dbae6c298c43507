use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::status::{self, CoarseStatus};
use crate::core::{DefectAgeClass, DefectRecord, Severity};

/// Counts bucketed by severity grade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounter {
    pub serious: usize,
    pub normal: usize,
    pub prompt: usize,
    pub total: usize,
}

impl SeverityCounter {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Serious => self.serious += 1,
            Severity::Normal => self.normal += 1,
            Severity::Prompt => self.prompt += 1,
        }
        self.total += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Sidebar counters filled during one filter pass.
///
/// The different counter families deliberately observe the record stream
/// at different pipeline stages, so each sidebar facet keeps showing
/// totals that are independent of its own filter. See
/// [`pipeline`](crate::query::pipeline) for the exact stage each family
/// is tied to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectAggregates {
    /// Severity tallies over records that passed every non-severity
    /// filter.
    pub serious_count: usize,
    pub normal_count: usize,
    pub prompt_count: usize,
    /// Coarse lifecycle tallies over records that passed the scoping
    /// filters, regardless of the requested status buckets.
    pub exist_count: usize,
    pub fix_count: usize,
    pub ignore_count: usize,
    /// Age tallies relative to the judge time.
    pub new_count: usize,
    pub history_count: usize,
    /// Records that survived the whole pipeline.
    pub total_count: usize,
    /// Per-checker tallies over status-matching records.
    pub checker_histogram: BTreeMap<String, usize>,
    /// Per-author tallies over status-matching records.
    pub author_histogram: BTreeMap<String, usize>,
    /// Judge time the age tallies were computed against.
    pub new_defect_judge_time: Option<i64>,
}

impl DefectAggregates {
    pub fn new(new_defect_judge_time: Option<i64>) -> Self {
        Self {
            new_defect_judge_time,
            ..Default::default()
        }
    }

    /// Fold a status-matching record into the checker and author
    /// histograms. Multi-author records count once per author.
    pub fn note_status_match(&mut self, record: &DefectRecord) {
        *self
            .checker_histogram
            .entry(record.checker_name.clone())
            .or_insert(0) += 1;
        for author in &record.authors {
            *self.author_histogram.entry(author.clone()).or_insert(0) += 1;
        }
    }

    /// Fold a record into the coarse lifecycle tallies. Excluded and
    /// unclassifiable records are counted nowhere.
    pub fn record_coarse(&mut self, status_mask: u32) {
        match status::classify(status_mask) {
            Some(CoarseStatus::New) => self.exist_count += 1,
            Some(CoarseStatus::Fixed) => self.fix_count += 1,
            Some(CoarseStatus::Ignored) => self.ignore_count += 1,
            Some(CoarseStatus::Excluded) | None => {}
        }
    }

    pub fn record_severity(&mut self, severity: Severity) {
        match severity {
            Severity::Serious => self.serious_count += 1,
            Severity::Normal => self.normal_count += 1,
            Severity::Prompt => self.prompt_count += 1,
        }
    }

    pub fn record_age(&mut self, age: DefectAgeClass) {
        match age {
            DefectAgeClass::New => self.new_count += 1,
            DefectAgeClass::History => self.history_count += 1,
        }
    }

    /// Sum of the severity tallies.
    pub fn severity_total(&self) -> usize {
        self.serious_count + self.normal_count + self.prompt_count
    }
}

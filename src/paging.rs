//! Stable sorting and 1-based pagination of filtered defect lists.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::core::DefectRecord;

/// Page size used when the request leaves it out.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Sortable columns of the defect list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    CreateTime,
    FixedTime,
    Severity,
    CheckerName,
    FilePathname,
    Id,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Paging and sorting part of a defect query. Every field is optional;
/// missing values fall back to create-time ascending, page 1, size 10.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
    pub sort_field: Option<SortField>,
    pub sort_direction: Option<SortDirection>,
}

/// One page of results plus the arithmetic the dashboard renders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub total_count: usize,
    /// 1-based page number the response answers for.
    pub page_number: usize,
    /// Effective page size after defaulting.
    pub page_size: usize,
    pub total_pages: usize,
    pub records: Vec<T>,
}

/// Cut one page out of the full result list.
///
/// Page numbers are 1-based; zero and negative numbers clamp to the
/// first page. A start offset beyond the list resets to the first page
/// while still echoing the requested page number, so a stale deep link
/// shows fresh results instead of an empty screen.
pub fn paginate<T>(items: Vec<T>, page_number: Option<i64>, page_size: Option<i64>) -> Page<T> {
    let total = items.len();
    let page0 = page_number.map_or(0, |n| if n < 1 { 0 } else { (n - 1) as usize });
    let size = match page_size {
        Some(s) if s >= 0 => s as usize,
        _ => DEFAULT_PAGE_SIZE as usize,
    };
    let total_pages = if size > 0 { total.div_ceil(size) } else { 0 };

    let mut start = page0.saturating_mul(size);
    if start > total {
        start = 0;
    }
    let records: Vec<T> = items.into_iter().skip(start).take(size).collect();

    Page {
        total_count: total,
        page_number: page0 + 1,
        page_size: size,
        total_pages,
        records,
    }
}

/// Sort records by one column. The sort is stable, so records that
/// compare equal keep the order the pipeline produced them in, for
/// either direction.
pub fn sort_defects(records: &mut [DefectRecord], field: SortField, direction: SortDirection) {
    records.sort_by(|a, b| {
        let ordering = compare_by_field(a, b, field);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare_by_field(a: &DefectRecord, b: &DefectRecord, field: SortField) -> Ordering {
    match field {
        SortField::CreateTime => a.create_time.cmp(&b.create_time),
        SortField::FixedTime => a.fixed_time.cmp(&b.fixed_time),
        SortField::Severity => a.severity.cmp(&b.severity),
        SortField::CheckerName => a.checker_name.cmp(&b.checker_name),
        SortField::FilePathname => a.file_pathname.cmp(&b.file_pathname),
        SortField::Id => a.id.cmp(&b.id),
    }
}

/// Sort survivors and cut the requested page in one step.
pub fn sort_and_page(mut records: Vec<DefectRecord>, request: &PageRequest) -> Page<DefectRecord> {
    let field = request.sort_field.unwrap_or_default();
    let direction = request.sort_direction.unwrap_or_default();
    sort_defects(&mut records, field, direction);
    paginate(records, request.page_number, request.page_size)
}

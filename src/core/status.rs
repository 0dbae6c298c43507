//! Defect status bitmask model.
//!
//! A defect's lifecycle state is a bitmask. `NEW` is exclusive: an open
//! defect carries status `NEW` and nothing else, and every other flag
//! implies the defect is no longer open. The remaining flags can combine
//! (a defect can be both ignored and masked by checker config), so coarse
//! classification resolves them in a fixed priority order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::core::errors::{Error, Result};

/// Open defect, reported by the tool and not yet resolved.
pub const NEW: u32 = 1;
/// Defect no longer reported, considered repaired.
pub const FIXED: u32 = 1 << 1;
/// Defect suppressed by a user with an ignore reason.
pub const IGNORE: u32 = 1 << 2;
/// Defect masked because its file matches a path filter.
pub const PATH_MASK: u32 = 1 << 3;
/// Defect masked because its checker is disabled.
pub const CHECKER_MASK: u32 = 1 << 4;

const ALL_FLAGS: u32 = NEW | FIXED | IGNORE | PATH_MASK | CHECKER_MASK;

/// Coarse lifecycle bucket derived from the raw bitmask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoarseStatus {
    New,
    Fixed,
    Ignored,
    Excluded,
}

impl fmt::Display for CoarseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CoarseStatus::New => "new",
            CoarseStatus::Fixed => "fixed",
            CoarseStatus::Ignored => "ignored",
            CoarseStatus::Excluded => "excluded",
        };
        write!(f, "{}", label)
    }
}

/// True only for a pure `NEW` status. Any additional flag means the
/// defect is no longer open, so this is an equality test, not a bit test.
#[inline]
pub fn is_new(status: u32) -> bool {
    status == NEW
}

#[inline]
pub fn is_fixed(status: u32) -> bool {
    status & FIXED != 0
}

#[inline]
pub fn is_ignored(status: u32) -> bool {
    status & IGNORE != 0
}

/// True when the defect is masked by path or checker configuration.
#[inline]
pub fn is_excluded(status: u32) -> bool {
    status & (PATH_MASK | CHECKER_MASK) != 0
}

/// Resolve a bitmask to its coarse bucket.
///
/// Combined masks resolve by priority: new, then fixed, then ignored,
/// then excluded. A mask that matches none of the buckets (only possible
/// for values [`validate`] rejects) yields `None`.
#[inline]
pub fn classify(status: u32) -> Option<CoarseStatus> {
    if is_new(status) {
        Some(CoarseStatus::New)
    } else if is_fixed(status) {
        Some(CoarseStatus::Fixed)
    } else if is_ignored(status) {
        Some(CoarseStatus::Ignored)
    } else if is_excluded(status) {
        Some(CoarseStatus::Excluded)
    } else {
        None
    }
}

/// True when the record's coarse bucket is one of the requested buckets.
#[inline]
pub fn matches_filter(status: u32, requested: &BTreeSet<CoarseStatus>) -> bool {
    classify(status).is_some_and(|bucket| requested.contains(&bucket))
}

/// Reject masks that no well-formed defect can carry.
pub fn validate(status: u32) -> Result<()> {
    if status == 0 {
        return Err(Error::Validation("status has no flags set".to_string()));
    }
    if status & !ALL_FLAGS != 0 {
        return Err(Error::Validation(format!(
            "status {:#x} carries unknown flags {:#x}",
            status,
            status & !ALL_FLAGS
        )));
    }
    if status & NEW != 0 && status != NEW {
        return Err(Error::Validation(format!(
            "status {:#x} combines NEW with resolution flags",
            status
        )));
    }
    Ok(())
}

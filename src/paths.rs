//! Path mask matching and path normalization helpers.

use glob::Pattern;
use std::collections::{BTreeMap, BTreeSet};

/// True when the path matches one mask entry.
///
/// A mask matches either as a plain substring or as a glob pattern, so
/// `src/vendor` and `**/vendor/**` both hit `/work/src/vendor/lib.c`.
/// A mask that is not valid glob syntax still participates as a
/// substring; it just never matches as a pattern.
pub fn matches_mask(path: &str, mask: &str) -> bool {
    if path.contains(mask) {
        return true;
    }
    match Pattern::new(mask) {
        Ok(pattern) => pattern.matches(path),
        Err(err) => {
            log::warn!("path mask {:?} is not valid glob syntax: {}", mask, err);
            false
        }
    }
}

/// True when the path matches any entry of the mask set.
pub fn matches_any_mask(path: &str, masks: &BTreeSet<String>) -> bool {
    masks.iter().any(|mask| matches_mask(path, mask))
}

/// Swap absolute defect paths for their repository-relative form.
///
/// `relate_paths` is keyed by lowercased absolute path. Paths with no
/// usable mapping are kept as-is.
pub fn to_relative_paths(
    paths: &BTreeSet<String>,
    relate_paths: &BTreeMap<String, String>,
) -> BTreeSet<String> {
    paths
        .iter()
        .map(|path| {
            relate_paths
                .get(&path.to_lowercase())
                .filter(|relative| !relative.is_empty())
                .cloned()
                .unwrap_or_else(|| path.clone())
        })
        .collect()
}

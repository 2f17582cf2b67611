//! Vertical-level ordering.
//!
//! Level codes carry a one-character unit marker followed by a numeric value
//! and an optional `-` range suffix ("P500", "P50-100"). Menus present them
//! ordered by the numeric value, not lexically.

use std::cmp::Ordering;

/// Numeric sort key for a level code.
///
/// Strips the leading unit marker and an optional `-range` suffix, then
/// parses the remainder. Returns `None` for codes with no parseable value.
pub fn level_sort_key(level: &str) -> Option<i64> {
    let stripped = level.get(1..)?;
    let numeric = match stripped.find('-') {
        Some(idx) => &stripped[..idx],
        None => stripped,
    };
    numeric.parse().ok()
}

/// Order two level codes by numeric key, unparseable codes last, ties lexical.
pub fn compare_levels(a: &str, b: &str) -> Ordering {
    let ka = level_sort_key(a);
    let kb = level_sort_key(b);
    match (ka, kb) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Sort level codes in place by their numeric key.
pub fn sort_levels(levels: &mut [String]) {
    levels.sort_by(|a, b| compare_levels(a, b));
}

#[cfg(test)]
#[path = "levels_test.rs"]
mod tests;

//! Forecast-lead normalization.
//!
//! Fact tables store leads at sub-unit granularity (HHMMSS-style ticks); a
//! lead that is an exact multiple of the scale collapses to whole units, any
//! other value passes through unchanged.

use std::collections::BTreeSet;

/// Ticks per whole forecast-lead unit.
pub const LEAD_SCALE: i64 = 10_000;

/// Normalize a raw lead value to whole units where exact.
pub fn normalize(raw: i64) -> i64 {
    if raw % LEAD_SCALE == 0 {
        raw / LEAD_SCALE
    } else {
        raw
    }
}

/// Fold one raw lead into the accumulating original and normalized sets.
pub fn fold(raw: i64, normalized: &mut BTreeSet<i64>, originals: &mut BTreeSet<i64>) {
    originals.insert(raw);
    normalized.insert(normalize(raw));
}

/// Render a lead set in ascending numeric order as decimal strings, the
/// form the published collection columns carry.
pub fn to_strings(leads: &BTreeSet<i64>) -> Vec<String> {
    leads.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
#[path = "leads_test.rs"]
mod tests;

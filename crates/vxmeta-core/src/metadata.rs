//! Metadata domain model.

use chrono::Utc;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Marker value carried in `fcst_orig` for default-profile rows.
pub const DEFAULT_LEAD_MARKER: &str = "dflt";

/// Sentinel group label for databases with no category of their own.
pub const UNGROUPED_LABEL: &str = "NO GROUP";

/// Default-profile date window: five years of lookback.
pub const DEFAULT_PROFILE_LOOKBACK_SECS: i64 = 5 * 365 * 86_400;

/// One published metadata row per (database, model).
///
/// Collection fields are kept in their canonical order: regions and
/// variables lexical, levels by level sort key, leads numeric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRow {
    pub database: String,
    pub model: String,
    pub display_text: String,
    pub regions: Vec<String>,
    pub levels: Vec<String>,
    pub fcst_lens: Vec<String>,
    pub fcst_orig: Vec<String>,
    pub variables: Vec<String>,
    /// Epoch seconds.
    pub min_date: i64,
    /// Epoch seconds.
    pub max_date: i64,
    pub record_count: i64,
    /// Epoch seconds.
    pub updated_at: i64,
}

impl MetadataRow {
    /// Menu label derived from the model name.
    pub fn display_text_for(model: &str) -> String {
        model.replace('.', "_")
    }

    /// A row is publishable only with all four set-valued fields non-empty.
    pub fn is_publishable(&self) -> bool {
        !self.regions.is_empty()
            && !self.levels.is_empty()
            && !self.fcst_lens.is_empty()
            && !self.variables.is_empty()
    }
}

/// Cached forecast-lead profile for a (database, model) pair whose database
/// was too large to fully scan. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultProfile {
    /// Normalized distinct leads for the whole database, numeric order.
    pub fcst_leads: Vec<String>,
    /// One [`DEFAULT_LEAD_MARKER`] per lead.
    pub fcst_leads_orig: Vec<String>,
    pub min_date: i64,
    pub max_date: i64,
}

impl DefaultProfile {
    /// Build a fresh profile from normalized leads and the current time.
    pub fn new(leads: &BTreeSet<i64>, now: i64) -> Self {
        let fcst_leads: Vec<String> = leads.iter().map(|v| v.to_string()).collect();
        let fcst_leads_orig = vec![DEFAULT_LEAD_MARKER.to_string(); fcst_leads.len()];
        Self {
            fcst_leads,
            fcst_leads_orig,
            min_date: now - DEFAULT_PROFILE_LOOKBACK_SECS,
            max_date: now,
        }
    }
}

/// Diagnostic record for a database skipped by the cardinality guard.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TooLargeEntry {
    /// `header_id_count * line_count`; wide so the product cannot overflow.
    pub compound_size: u128,
    pub header_id_count: i64,
    pub line_count: i64,
}

/// Point-in-time mapping from group label to the databases that published
/// at least one valid metadata row under it. Rebuilt fully each run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageGroups(BTreeMap<String, BTreeSet<String>>);

impl CoverageGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `database` under `label`.
    pub fn add(&mut self, label: &str, database: &str) {
        self.0
            .entry(label.to_string())
            .or_default()
            .insert(database.to_string());
    }

    /// Record `database` under the sentinel ungrouped label.
    pub fn add_ungrouped(&mut self, database: &str) {
        self.add(UNGROUPED_LABEL, database);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.0.iter()
    }
}

/// Current wall clock in epoch seconds.
pub fn epoch_now() -> i64 {
    Utc::now().timestamp()
}

#[cfg(test)]
#[path = "metadata_test.rs"]
mod tests;

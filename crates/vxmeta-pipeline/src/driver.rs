//! Pipeline driver: sequence aggregation, snapshot, and publication.

use crate::error::PipelineResult;
use crate::{aggregate, reconcile, schema, snapshot};
use serde::Serialize;
use std::collections::BTreeMap;
use vxmeta_core::{Config, CoverageGroups, TooLargeEntry};
use vxmeta_db::Store;

/// Outcome of one pipeline run.
#[derive(Debug, Serialize)]
pub struct PipelineReport {
    pub databases_scanned: usize,
    pub rows_published: usize,
    pub rows_dropped: usize,
    /// Databases skipped by the cardinality guard, with their cost metrics.
    pub too_large: BTreeMap<String, TooLargeEntry>,
}

/// Run the full pipeline: prepare tables, aggregate every candidate
/// database into the dev snapshot, then reconcile into production.
///
/// Databases are processed strictly sequentially. Any store error aborts
/// the run; a guard trip does not.
pub async fn run(store: &dyn Store, cfg: &Config, now: i64) -> PipelineResult<PipelineReport> {
    log::info!(
        "Starting metadata run against {} store, schema {}",
        store.store_type(),
        cfg.metadata_schema
    );
    schema::prepare(store, cfg).await?;

    let databases = aggregate::list_databases(store, cfg).await?;
    log::info!("Found {} candidate databases", databases.len());

    let mut report = PipelineReport {
        databases_scanned: databases.len(),
        rows_published: 0,
        rows_dropped: 0,
        too_large: BTreeMap::new(),
    };
    let mut groups = CoverageGroups::new();

    for database in &databases {
        let scan = aggregate::scan_database(store, cfg, database, now).await?;
        if let Some(entry) = scan.too_large {
            report.too_large.insert(database.clone(), entry);
        }

        let mut published_any = false;
        for row in &scan.rows {
            if snapshot::write_row(store, cfg, row).await? {
                published_any = true;
                report.rows_published += 1;
            } else {
                report.rows_dropped += 1;
            }
        }

        if published_any {
            let categories = aggregate::coverage_categories(store, database).await?;
            if categories.is_empty() {
                groups.add_ungrouped(database);
            } else {
                for category in &categories {
                    groups.add(category, database);
                }
            }
        }
    }

    snapshot::write_groups(store, cfg, &groups).await?;
    reconcile::publish(store, cfg).await?;

    log::info!(
        "Run complete: {} published, {} dropped, {} too large",
        report.rows_published,
        report.rows_dropped,
        report.too_large.len()
    );
    Ok(report)
}

#[cfg(test)]
#[path = "driver_test.rs"]
mod tests;

//! Dev snapshot writers.
//!
//! Only this module writes the dev tables; only the reconciler touches the
//! production tables.

use crate::error::PipelineResult;
use crate::schema::Tables;
use vxmeta_core::{codec, Config, CoverageGroups, MetadataRow};
use vxmeta_db::Store;

/// Insert one metadata row into the dev snapshot.
///
/// A row missing any of its four set-valued fields is not publishable and
/// is dropped without error. Returns whether the row was written.
pub async fn write_row(
    store: &dyn Store,
    cfg: &Config,
    row: &MetadataRow,
) -> PipelineResult<bool> {
    if !row.is_publishable() {
        log::info!(
            "Dropping row for {}/{}: incomplete dimensional coverage",
            row.database,
            row.model
        );
        return Ok(false);
    }

    let table = Tables::new(cfg).metadata_dev();
    store
        .execute_with(
            &format!(
                "INSERT INTO {table}
                 (db, model, display_text, regions, levels, fcst_lens, variables, fcst_orig,
                  mindate, maxdate, numrecs, updated)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            ),
            &[
                row.database.as_str().into(),
                row.model.as_str().into(),
                row.display_text.as_str().into(),
                codec::encode(&row.regions)?.into(),
                codec::encode(&row.levels)?.into(),
                codec::encode(&row.fcst_lens)?.into(),
                codec::encode(&row.variables)?.into(),
                codec::encode(&row.fcst_orig)?.into(),
                row.min_date.into(),
                row.max_date.into(),
                row.record_count.into(),
                row.updated_at.into(),
            ],
        )
        .await?;
    store.commit().await?;
    Ok(true)
}

/// Insert one row per coverage group into the dev grouping snapshot.
pub async fn write_groups(
    store: &dyn Store,
    cfg: &Config,
    groups: &CoverageGroups,
) -> PipelineResult<()> {
    let table = Tables::new(cfg).groups_dev();
    for (label, databases) in groups.iter() {
        let dbs: Vec<&str> = databases.iter().map(String::as_str).collect();
        store
            .execute_with(
                &format!("INSERT INTO {table} (db_group, dbs) VALUES (?, ?)"),
                &[label.as_str().into(), codec::encode(&dbs)?.into()],
            )
            .await?;
    }
    store.commit().await?;
    Ok(())
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod tests;

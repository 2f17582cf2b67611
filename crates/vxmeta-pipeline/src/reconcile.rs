//! Dev/production reconciliation.
//!
//! Production must never lose a (db, model) pair it already had, even when
//! the current run did not re-scan that database. The protocol:
//!
//! 1. Union production and dev into a staging table, then atomically swap it
//!    into the production name. Identical rows collapse in the union;
//!    differing rows for the same key survive as duplicates.
//! 2. Reconcile fields per key against the dev snapshot: numeric fields
//!    merge monotonically, collection fields merge by set union. Keys absent
//!    from dev are left untouched. Updates hit every duplicate of a key,
//!    making them field-identical.
//! 3. Collapse remaining duplicates with a DISTINCT rebuild behind the same
//!    atomic swap, skipped when no key is duplicated so an unchanged re-run
//!    issues no writes.
//! 4. Mirror the grouping snapshot into the published grouping table.

use crate::error::{PipelineError, PipelineResult};
use crate::schema::{metadata_ddl, Tables};
use std::collections::BTreeMap;
use vxmeta_core::codec::{self, ListOrder};
use vxmeta_core::Config;
use vxmeta_db::{Store, Value};

/// Collection columns with their canonical orderings.
const COLLECTION_FIELDS: [(&str, ListOrder); 5] = [
    ("regions", ListOrder::Lexical),
    ("levels", ListOrder::Level),
    ("fcst_lens", ListOrder::Numeric),
    ("variables", ListOrder::Lexical),
    ("fcst_orig", ListOrder::Numeric),
];

/// Merge the dev snapshot into the production tables.
pub async fn publish(store: &dyn Store, cfg: &Config) -> PipelineResult<()> {
    let t = Tables::new(cfg);
    log::info!("Publishing metadata into {}", t.metadata());

    union_into_production(store, &t).await?;
    reconcile_numeric(store, &t).await?;
    reconcile_collections(store, &t).await?;
    dedupe_production(store, &t).await?;
    mirror_groups(store, &t).await?;
    Ok(())
}

/// Step 1: full-row union of production and dev, swapped in atomically.
async fn union_into_production(store: &dyn Store, t: &Tables) -> PipelineResult<()> {
    let staging = t.metadata_staging();
    store
        .execute(&format!("DROP TABLE IF EXISTS {staging}"))
        .await?;
    store.execute(&metadata_ddl(&staging)).await?;
    store
        .execute(&format!(
            "INSERT INTO {staging} SELECT * FROM {} UNION SELECT * FROM {}",
            t.metadata(),
            t.metadata_dev()
        ))
        .await?;
    store.swap_tables(&t.metadata(), &staging).await?;
    store.commit().await?;
    Ok(())
}

/// Step 2a: monotonic merge of the numeric fields.
///
/// Production values are collapsed per key with MIN/MAX aggregates, which
/// deterministically resolves union duplicates before the dev merge.
async fn reconcile_numeric(store: &dyn Store, t: &Tables) -> PipelineResult<()> {
    let production = store
        .query(&format!(
            "SELECT db, model,
                    MIN(mindate) AS mindate, MAX(maxdate) AS maxdate,
                    MAX(numrecs) AS numrecs, MAX(updated) AS updated,
                    COUNT(*) AS copies
             FROM {} GROUP BY db, model ORDER BY db, model",
            t.metadata()
        ))
        .await?;

    for prod in &production.rows {
        let db = prod.try_str("db")?.to_string();
        let model = prod.try_str("model")?.to_string();
        let key: [Value; 2] = [db.as_str().into(), model.as_str().into()];

        let dev = store
            .query_with(
                &format!(
                    "SELECT mindate, maxdate, numrecs, updated FROM {} WHERE db = ? AND model = ?",
                    t.metadata_dev()
                ),
                &key,
            )
            .await?;
        let Some(dev_row) = dev.rows.first() else {
            // Not re-scanned this run; prior knowledge stands.
            continue;
        };

        let merged_min = dev_row.try_i64("mindate")?.min(prod.try_i64("mindate")?);
        let merged_max = dev_row.try_i64("maxdate")?.max(prod.try_i64("maxdate")?);
        let merged_recs = dev_row.try_i64("numrecs")?.max(prod.try_i64("numrecs")?);
        let merged_updated = dev_row.try_i64("updated")?.max(prod.try_i64("updated")?);

        let changed = prod.try_i64("copies")? > 1
            || merged_min != prod.try_i64("mindate")?
            || merged_max != prod.try_i64("maxdate")?
            || merged_recs != prod.try_i64("numrecs")?
            || merged_updated != prod.try_i64("updated")?;
        if !changed {
            continue;
        }

        store
            .execute_with(
                &format!(
                    "UPDATE {} SET mindate = ?, maxdate = ?, numrecs = ?, updated = ?
                     WHERE db = ? AND model = ?",
                    t.metadata()
                ),
                &[
                    merged_min.into(),
                    merged_max.into(),
                    merged_recs.into(),
                    merged_updated.into(),
                    db.as_str().into(),
                    model.as_str().into(),
                ],
            )
            .await?;
    }
    store.commit().await?;
    Ok(())
}

/// Step 2b: set-union merge of the collection fields.
async fn reconcile_collections(store: &dyn Store, t: &Tables) -> PipelineResult<()> {
    let field_list = COLLECTION_FIELDS.map(|(f, _)| f).join(", ");
    let production = store
        .query(&format!(
            "SELECT db, model, {field_list} FROM {} ORDER BY db, model",
            t.metadata()
        ))
        .await?;

    // Collect every production copy of every key before issuing updates.
    let mut by_key: BTreeMap<(String, String), Vec<Vec<String>>> = BTreeMap::new();
    for row in &production.rows {
        let mut fields = Vec::with_capacity(COLLECTION_FIELDS.len());
        for (field, _) in COLLECTION_FIELDS {
            fields.push(row.try_str(field)?.to_string());
        }
        by_key
            .entry((
                row.try_str("db")?.to_string(),
                row.try_str("model")?.to_string(),
            ))
            .or_default()
            .push(fields);
    }

    for ((db, model), copies) in &by_key {
        let key: [Value; 2] = [db.as_str().into(), model.as_str().into()];
        let dev = store
            .query_with(
                &format!(
                    "SELECT {field_list} FROM {} WHERE db = ? AND model = ?",
                    t.metadata_dev()
                ),
                &key,
            )
            .await?;
        let Some(dev_row) = dev.rows.first() else {
            continue;
        };

        let mut merged = Vec::with_capacity(COLLECTION_FIELDS.len());
        let mut changed = false;
        for (i, (field, order)) in COLLECTION_FIELDS.iter().enumerate() {
            let union = codec::union_all(
                copies
                    .iter()
                    .map(|copy| copy[i].as_str())
                    .chain([dev_row.try_str(field)?]),
                *order,
            )?;
            if copies.iter().any(|copy| copy[i] != union) {
                changed = true;
            }
            merged.push(union);
        }
        if !changed {
            continue;
        }

        let assignments = COLLECTION_FIELDS
            .map(|(f, _)| format!("{f} = ?"))
            .join(", ");
        let mut params: Vec<Value> = merged.into_iter().map(Value::from).collect();
        params.push(db.as_str().into());
        params.push(model.as_str().into());
        store
            .execute_with(
                &format!(
                    "UPDATE {} SET {assignments} WHERE db = ? AND model = ?",
                    t.metadata()
                ),
                &params,
            )
            .await?;
    }
    store.commit().await?;
    Ok(())
}

/// Step 3: collapse duplicate key rows left by the union, if any.
async fn dedupe_production(store: &dyn Store, t: &Tables) -> PipelineResult<()> {
    let counts = store
        .query(&format!(
            "SELECT COUNT(*) AS total,
                    (SELECT COUNT(*) FROM (SELECT DISTINCT db, model FROM {m}) k) AS distinct_keys
             FROM {m}",
            m = t.metadata()
        ))
        .await?;
    let row = counts
        .rows
        .first()
        .ok_or_else(|| PipelineError::ReconcileError("no count row for dedupe".to_string()))?;
    if row.try_i64("total")? == row.try_i64("distinct_keys")? {
        return Ok(());
    }

    log::info!("Collapsing duplicate production rows");
    let staging = t.metadata_staging();
    store
        .execute(&format!("DROP TABLE IF EXISTS {staging}"))
        .await?;
    store.execute(&metadata_ddl(&staging)).await?;
    store
        .execute(&format!(
            "INSERT INTO {staging} SELECT DISTINCT * FROM {}",
            t.metadata()
        ))
        .await?;
    store.swap_tables(&t.metadata(), &staging).await?;
    store.commit().await?;
    Ok(())
}

/// Step 4: the published grouping is a point-in-time copy of the snapshot.
async fn mirror_groups(store: &dyn Store, t: &Tables) -> PipelineResult<()> {
    store
        .execute(&format!("DELETE FROM {}", t.groups()))
        .await?;
    store
        .execute(&format!(
            "INSERT INTO {} SELECT * FROM {}",
            t.groups(),
            t.groups_dev()
        ))
        .await?;
    store.commit().await?;
    Ok(())
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;

//! Default forecast-lead profiles for databases too large to fully scan.
//!
//! A profile is computed at most once per (database, model) and cached in
//! the `default_fcst_leads` table. Later calls return the cached value even
//! if the underlying data has changed; staleness is the accepted price of
//! bounding cost.

use crate::error::PipelineResult;
use crate::schema::Tables;
use std::collections::BTreeSet;
use vxmeta_core::metadata::DefaultProfile;
use vxmeta_core::{codec, leads, Config};
use vxmeta_db::Store;

/// Fetch the cached profile for (database, model), creating it on miss.
///
/// The lead set is the distinct leads of the *entire* database, unfiltered
/// by model, region, or level. The date window is five years back from
/// `now`.
pub async fn get_or_create(
    store: &dyn Store,
    cfg: &Config,
    database: &str,
    model: &str,
    now: i64,
) -> PipelineResult<DefaultProfile> {
    let table = Tables::new(cfg).default_leads();

    let cached = store
        .query_with(
            &format!(
                "SELECT fcst_leads, fcst_leads_orig, mindate, maxdate
                 FROM {table} WHERE db = ? AND model = ?"
            ),
            &[database.into(), model.into()],
        )
        .await?;
    if let Some(row) = cached.rows.first() {
        return Ok(DefaultProfile {
            fcst_leads: codec::decode(row.try_str("fcst_leads")?)?,
            fcst_leads_orig: codec::decode(row.try_str("fcst_leads_orig")?)?,
            min_date: row.try_i64("mindate")?,
            max_date: row.try_i64("maxdate")?,
        });
    }

    log::info!("Creating default forecast-lead profile for {database}/{model}");
    let fact = format!("{database}.{}", cfg.fact_table);
    let result = store
        .query(&format!("SELECT DISTINCT fcst_lead FROM {fact}"))
        .await?;
    let mut lead_set = BTreeSet::new();
    for row in &result.rows {
        if let Some(raw) = row.opt_i64("fcst_lead")? {
            lead_set.insert(leads::normalize(raw));
        }
    }

    let profile = DefaultProfile::new(&lead_set, now);
    store
        .execute_with(
            &format!(
                "INSERT INTO {table} (db, model, fcst_leads, fcst_leads_orig, mindate, maxdate)
                 VALUES (?, ?, ?, ?, ?, ?)"
            ),
            &[
                database.into(),
                model.into(),
                codec::encode(&profile.fcst_leads)?.into(),
                codec::encode(&profile.fcst_leads_orig)?.into(),
                profile.min_date.into(),
                profile.max_date.into(),
            ],
        )
        .await?;
    store.commit().await?;
    Ok(profile)
}

#[cfg(test)]
#[path = "defaults_test.rs"]
mod tests;

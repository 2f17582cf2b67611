//! Per-database metadata aggregation.
//!
//! For each candidate database: estimate the scan cost, enumerate models,
//! and compute each model's dimensional coverage, forecast leads, and date
//! range. Databases over the cardinality limit keep their (cheap) header
//! dimension scans but take forecast leads and dates from cached default
//! profiles instead of walking the fact table.

use crate::defaults;
use crate::error::{PipelineError, PipelineResult};
use std::collections::BTreeSet;
use vxmeta_core::metadata::DefaultProfile;
use vxmeta_core::{leads, levels, Config, MetadataRow, TooLargeEntry};
use vxmeta_db::{Store, Value};

/// Result of scanning one database.
#[derive(Debug)]
pub struct DatabaseScan {
    pub database: String,
    /// Candidate rows with `record_count > 0`; the snapshot writer applies
    /// the set-field publishability gate.
    pub rows: Vec<MetadataRow>,
    /// Present when the cardinality guard tripped for this database.
    pub too_large: Option<TooLargeEntry>,
}

/// List candidate databases: schemas matching the configured prefix.
pub async fn list_databases(store: &dyn Store, cfg: &Config) -> PipelineResult<Vec<String>> {
    let pattern = format!("{}%", cfg.database_prefix);
    let result = store
        .query_with(
            "SELECT schema_name FROM information_schema.schemata
             WHERE schema_name LIKE ? ORDER BY schema_name",
            &[pattern.into()],
        )
        .await?;
    Ok(result.column_strings("schema_name")?)
}

/// Aggregate all models of one database.
pub async fn scan_database(
    store: &dyn Store,
    cfg: &Config,
    database: &str,
    now: i64,
) -> PipelineResult<DatabaseScan> {
    let fact = format!("{database}.{}", cfg.fact_table);
    let header = format!("{database}.stat_header");
    let level_pattern = format!("{}%", cfg.level_prefix);

    let line_count = count_query(store, &format!("SELECT count(*) AS n FROM {fact}"), &[]).await?;
    let header_id_count = count_query(
        store,
        &format!(
            "SELECT count(DISTINCT stat_header_id) AS n FROM {header} WHERE fcst_lev LIKE ?"
        ),
        &[level_pattern.as_str().into()],
    )
    .await?;

    let compound_size = header_id_count.max(0) as u128 * line_count.max(0) as u128;
    let too_large = if compound_size > cfg.cardinality_limit as u128 {
        log::warn!(
            "{database}: compound iterations {compound_size} (headers {header_id_count} x lines {line_count}) \
             exceed limit {} - defaulting metadata",
            cfg.cardinality_limit
        );
        Some(TooLargeEntry {
            compound_size,
            header_id_count,
            line_count,
        })
    } else {
        None
    };

    let models = store
        .query_with(
            &format!(
                "SELECT DISTINCT model FROM {header} WHERE fcst_lev LIKE ? ORDER BY model"
            ),
            &[level_pattern.as_str().into()],
        )
        .await?
        .column_strings("model")?;

    let mut rows = Vec::new();
    for model in &models {
        log::info!("Processing model {model} in {database}");
        let dims = model_dimensions(store, &header, &level_pattern, model).await?;

        let row = if too_large.is_some() {
            let profile = defaults::get_or_create(store, cfg, database, model, now).await?;
            default_row(database, model, dims, profile, line_count, now)
        } else {
            let header_ids = store
                .query_with(
                    &format!(
                        "SELECT stat_header_id FROM {header} WHERE model = ? AND fcst_lev LIKE ?"
                    ),
                    &[model.as_str().into(), level_pattern.as_str().into()],
                )
                .await?
                .column_i64s("stat_header_id")?;
            let (normalized, originals) = model_leads(store, &fact, &header_ids).await?;
            let stats = model_stats(store, &fact, &header_ids, now).await?;
            scanned_row(database, model, dims, normalized, originals, stats, now)
        };

        match row {
            Some(r) => rows.push(r),
            None => log::info!("No valid metadata for model {model} in {database}"),
        }
    }

    Ok(DatabaseScan {
        database: database.to_string(),
        rows,
        too_large,
    })
}

/// Category labels a database files itself under, from its own `metadata`
/// table. Absent table or no rows means the sentinel group.
pub async fn coverage_categories(
    store: &dyn Store,
    database: &str,
) -> PipelineResult<Vec<String>> {
    let table = format!("{database}.metadata");
    if !store.relation_exists(&table).await? {
        return Ok(Vec::new());
    }
    let result = store
        .query(&format!("SELECT category FROM {table}"))
        .await?;
    Ok(result
        .rows
        .iter()
        .filter_map(|r| r.get("category").and_then(|v| v.as_str()))
        .map(str::to_string)
        .collect())
}

/// Distinct dimension values for one model.
#[derive(Debug)]
pub(crate) struct Dimensions {
    regions: Vec<String>,
    levels: Vec<String>,
    variables: Vec<String>,
}

async fn model_dimensions(
    store: &dyn Store,
    header: &str,
    level_pattern: &str,
    model: &str,
) -> PipelineResult<Dimensions> {
    let params: [Value; 2] = [level_pattern.into(), model.into()];

    let regions = distinct_strings(
        store,
        &format!(
            "SELECT DISTINCT vx_mask AS v FROM {header}
             WHERE fcst_lev LIKE ? AND model = ? ORDER BY v"
        ),
        &params,
    )
    .await?;

    let mut level_codes = distinct_strings(
        store,
        &format!(
            "SELECT DISTINCT fcst_lev AS v FROM {header}
             WHERE fcst_lev LIKE ? AND model = ?"
        ),
        &params,
    )
    .await?;
    levels::sort_levels(&mut level_codes);

    let variables = distinct_strings(
        store,
        &format!(
            "SELECT DISTINCT fcst_var AS v FROM {header}
             WHERE fcst_lev LIKE ? AND model = ? ORDER BY v"
        ),
        &params,
    )
    .await?;

    Ok(Dimensions {
        regions,
        levels: level_codes,
        variables,
    })
}

/// Fold distinct fact-table leads of every header into the original and
/// normalized sets.
async fn model_leads(
    store: &dyn Store,
    fact: &str,
    header_ids: &[i64],
) -> PipelineResult<(BTreeSet<i64>, BTreeSet<i64>)> {
    let mut normalized = BTreeSet::new();
    let mut originals = BTreeSet::new();
    for id in header_ids {
        let result = store
            .query_with(
                &format!("SELECT DISTINCT fcst_lead FROM {fact} WHERE stat_header_id = ?"),
                &[Value::Int(*id)],
            )
            .await?;
        for row in &result.rows {
            if let Some(raw) = row.opt_i64("fcst_lead")? {
                leads::fold(raw, &mut normalized, &mut originals);
            }
        }
    }
    Ok((normalized, originals))
}

#[derive(Debug)]
struct ModelStats {
    min_date: i64,
    max_date: i64,
    record_count: i64,
}

/// Fold per-header (min, max, count) into running extremes and a sum.
///
/// A header with no fact rows yields NULL extremes and must not disturb the
/// fold; if no header contributed at all, both dates fall back to `now`.
async fn model_stats(
    store: &dyn Store,
    fact: &str,
    header_ids: &[i64],
    now: i64,
) -> PipelineResult<ModelStats> {
    let mut min_date = i64::MAX;
    let mut max_date = i64::MIN;
    let mut record_count: i64 = 0;

    for id in header_ids {
        let result = store
            .query_with(
                &format!(
                    "SELECT CAST(epoch(MIN(fcst_valid_beg)) AS BIGINT) AS mindate,
                            CAST(epoch(MAX(fcst_valid_beg)) AS BIGINT) AS maxdate,
                            COUNT(fcst_valid_beg) AS numrecs
                     FROM {fact} WHERE stat_header_id = ?"
                ),
                &[Value::Int(*id)],
            )
            .await?;
        if let Some(row) = result.rows.first() {
            if let Some(lo) = row.opt_i64("mindate")? {
                min_date = min_date.min(lo);
            }
            if let Some(hi) = row.opt_i64("maxdate")? {
                max_date = max_date.max(hi);
            }
            record_count += row.try_i64("numrecs")?;
        }
    }

    if min_date == i64::MAX {
        min_date = now;
    }
    if max_date == i64::MIN {
        max_date = now;
    }
    Ok(ModelStats {
        min_date,
        max_date,
        record_count,
    })
}

fn scanned_row(
    database: &str,
    model: &str,
    dims: Dimensions,
    normalized: BTreeSet<i64>,
    originals: BTreeSet<i64>,
    stats: ModelStats,
    now: i64,
) -> Option<MetadataRow> {
    if stats.record_count <= 0 {
        return None;
    }
    Some(MetadataRow {
        database: database.to_string(),
        model: model.to_string(),
        display_text: MetadataRow::display_text_for(model),
        regions: dims.regions,
        levels: dims.levels,
        fcst_lens: leads::to_strings(&normalized),
        fcst_orig: leads::to_strings(&originals),
        variables: dims.variables,
        min_date: stats.min_date,
        max_date: stats.max_date,
        record_count: stats.record_count,
        updated_at: now,
    })
}

fn default_row(
    database: &str,
    model: &str,
    dims: Dimensions,
    profile: DefaultProfile,
    line_count: i64,
    now: i64,
) -> Option<MetadataRow> {
    // The fact-table row count is imprecise for a single model, but
    // positive, which is what downstream validity checks need.
    if line_count <= 0 {
        return None;
    }
    Some(MetadataRow {
        database: database.to_string(),
        model: model.to_string(),
        display_text: MetadataRow::display_text_for(model),
        regions: dims.regions,
        levels: dims.levels,
        fcst_lens: profile.fcst_leads,
        fcst_orig: profile.fcst_leads_orig,
        variables: dims.variables,
        min_date: profile.min_date,
        max_date: profile.max_date,
        record_count: line_count,
        updated_at: now,
    })
}

async fn distinct_strings(
    store: &dyn Store,
    sql: &str,
    params: &[Value],
) -> PipelineResult<Vec<String>> {
    let result = store.query_with(sql, params).await?;
    Ok(result
        .rows
        .iter()
        .filter_map(|r| r.get("v").and_then(|v| v.as_str()))
        .map(str::to_string)
        .collect())
}

async fn count_query(store: &dyn Store, sql: &str, params: &[Value]) -> PipelineResult<i64> {
    let result = store.query_with(sql, params).await?;
    let row = result
        .rows
        .first()
        .ok_or_else(|| PipelineError::AggregationError(format!("no count row from: {sql}")))?;
    Ok(row.try_i64("n")?)
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;

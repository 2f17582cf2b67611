//! Metadata table names and DDL.
//!
//! All six tables live in one metadata schema. `prepare` is re-entrant:
//! every run creates whatever is missing and truncates the dev snapshot
//! tables, which also repairs partial rows left by a crashed run.

use crate::error::PipelineResult;
use vxmeta_core::Config;
use vxmeta_db::Store;

/// Qualified table names for one metadata schema.
#[derive(Debug, Clone)]
pub struct Tables {
    schema: String,
}

impl Tables {
    pub fn new(cfg: &Config) -> Self {
        Self {
            schema: cfg.metadata_schema.clone(),
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Durable reconciled publication.
    pub fn metadata(&self) -> String {
        format!("{}.metadata", self.schema)
    }

    /// Per-run snapshot, truncated each run.
    pub fn metadata_dev(&self) -> String {
        format!("{}.metadata_dev", self.schema)
    }

    /// Scratch table for the union/dedupe swap steps.
    pub fn metadata_staging(&self) -> String {
        format!("{}.metadata_staging", self.schema)
    }

    /// Published coverage grouping.
    pub fn groups(&self) -> String {
        format!("{}.database_groups", self.schema)
    }

    /// Per-run coverage grouping snapshot.
    pub fn groups_dev(&self) -> String {
        format!("{}.database_groups_dev", self.schema)
    }

    /// Cached default forecast-lead profiles.
    pub fn default_leads(&self) -> String {
        format!("{}.default_fcst_leads", self.schema)
    }
}

/// DDL for a metadata table (production, dev, and staging share it).
pub fn metadata_ddl(name: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {name} (
            db VARCHAR,
            model VARCHAR,
            display_text VARCHAR,
            regions VARCHAR,
            levels VARCHAR,
            fcst_lens VARCHAR,
            variables VARCHAR,
            fcst_orig VARCHAR,
            mindate BIGINT,
            maxdate BIGINT,
            numrecs BIGINT,
            updated BIGINT
        )"
    )
}

fn groups_ddl(name: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {name} (
            db_group VARCHAR,
            dbs VARCHAR
        )"
    )
}

fn default_leads_ddl(name: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {name} (
            db VARCHAR,
            model VARCHAR,
            fcst_leads VARCHAR,
            fcst_leads_orig VARCHAR,
            mindate BIGINT,
            maxdate BIGINT
        )"
    )
}

/// Create the metadata schema and any missing tables, then truncate the dev
/// snapshot tables.
pub async fn prepare(store: &dyn Store, cfg: &Config) -> PipelineResult<()> {
    let t = Tables::new(cfg);

    log::debug!("Ensuring metadata schema {}", t.schema());
    store
        .execute(&format!("CREATE SCHEMA IF NOT EXISTS {}", t.schema()))
        .await?;

    for ddl in [
        metadata_ddl(&t.metadata_dev()),
        metadata_ddl(&t.metadata()),
        groups_ddl(&t.groups_dev()),
        groups_ddl(&t.groups()),
        default_leads_ddl(&t.default_leads()),
    ] {
        store.execute(&ddl).await?;
    }

    log::debug!("Clearing dev snapshot tables");
    store
        .execute(&format!("DELETE FROM {}", t.metadata_dev()))
        .await?;
    store
        .execute(&format!("DELETE FROM {}", t.groups_dev()))
        .await?;
    store.commit().await?;
    Ok(())
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;

//! List the metadata tables and their row counts.

use crate::cli::GlobalArgs;
use crate::commands::common;
use anyhow::{Context, Result};
use vxmeta_db::Store;
use vxmeta_pipeline::Tables;

/// Execute the show command.
pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let config = common::load_config(global)?;
    let store = common::open_store(&config)?;
    let tables = Tables::new(&config);

    println!("Metadata tables in {}:\n", config.metadata_schema);
    for table in [
        tables.metadata(),
        tables.metadata_dev(),
        tables.groups(),
        tables.groups_dev(),
        tables.default_leads(),
    ] {
        if !store
            .relation_exists(&table)
            .await
            .context("Failed to check table")?
        {
            println!("  {table:<40} (missing)");
            continue;
        }
        let result = store
            .query(&format!("SELECT count(*) AS n FROM {table}"))
            .await
            .with_context(|| format!("Failed to count {table}"))?;
        let count = match result.rows.first() {
            Some(row) => row.try_i64("n")?,
            None => 0,
        };
        println!("  {table:<40} {count:>8} rows");
    }
    Ok(())
}

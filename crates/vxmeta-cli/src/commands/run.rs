//! Execute the metadata pipeline.

use crate::cli::{GlobalArgs, RunArgs};
use crate::commands::common;
use anyhow::{Context, Result};
use vxmeta_core::metadata::epoch_now;

/// Execute the run command.
pub async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let config = common::load_config(global)?;
    let store = common::open_store(&config)?;

    let report = vxmeta_pipeline::driver::run(&store, &config, epoch_now())
        .await
        .context("Metadata run failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Databases scanned: {}", report.databases_scanned);
    println!("Rows published:    {}", report.rows_published);
    println!("Rows dropped:      {}", report.rows_dropped);

    if !report.too_large.is_empty() {
        // Diagnostic only; skipped databases do not fail the run.
        println!(
            "\nDid not fully scan these databases (too large): {}",
            serde_json::to_string_pretty(&report.too_large)?
        );
    }
    Ok(())
}

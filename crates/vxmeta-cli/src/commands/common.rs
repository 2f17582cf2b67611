//! Shared utilities for CLI commands

use crate::cli::GlobalArgs;
use anyhow::{Context, Result};
use std::path::Path;
use vxmeta_core::Config;
use vxmeta_db::DuckDbStore;

/// Load configuration and apply CLI overrides.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    let mut config = match &global.config {
        Some(path) => Config::load(Path::new(path))
            .with_context(|| format!("Failed to load config from {path}"))?,
        None => Config::load_from_dir(Path::new(".")).context("Failed to load config")?,
    };

    if let Some(store) = &global.store {
        config.store.path = store.clone();
    }
    if let Some(schema) = &global.metadata_schema {
        config.metadata_schema = schema.clone();
    }
    if let Some(limit) = global.limit {
        config.cardinality_limit = limit;
    }

    // Overrides bypass the file loader, so validate again.
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Open the configured store.
pub(crate) fn open_store(config: &Config) -> Result<DuckDbStore> {
    DuckDbStore::new(&config.store.path)
        .with_context(|| format!("Failed to open store at {}", config.store.path))
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;

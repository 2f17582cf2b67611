//! Configuration types and parsing for vxmeta.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration from vxmeta.yml
///
/// Every pipeline entry point takes a `&Config`; nothing reads ambient
/// globals. CLI flags override individual fields after loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Store connection configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Schema holding the published metadata tables
    #[serde(default = "default_metadata_schema")]
    pub metadata_schema: String,

    /// Prefix selecting which databases (schemas) are scanned
    #[serde(default = "default_database_prefix")]
    pub database_prefix: String,

    /// Fact table name inside each scanned database
    #[serde(default = "default_fact_table")]
    pub fact_table: String,

    /// Level-code prefix filter applied to header rows
    #[serde(default = "default_level_prefix")]
    pub level_prefix: String,

    /// Cardinality guard: a database whose
    /// `distinct_header_count * fact_row_count` exceeds this limit is not
    /// fully scanned; its models receive default profiles instead.
    #[serde(default = "default_cardinality_limit")]
    pub cardinality_limit: u64,
}

/// Store connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store path (file-based or :memory:)
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            metadata_schema: default_metadata_schema(),
            database_prefix: default_database_prefix(),
            fact_table: default_fact_table(),
            level_prefix: default_level_prefix(),
            cardinality_limit: default_cardinality_limit(),
        }
    }
}

const DEFAULT_STORE_PATH: &str = ":memory:";

fn default_store_path() -> String {
    DEFAULT_STORE_PATH.to_string()
}

fn default_metadata_schema() -> String {
    "vx_metadata".to_string()
}

fn default_database_prefix() -> String {
    "mv_".to_string()
}

fn default_fact_table() -> String {
    "line_data_sl1l2".to_string()
}

fn default_level_prefix() -> String {
    "P".to_string()
}

fn default_cardinality_limit() -> u64 {
    10_000_000_000
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory.
    /// Looks for vxmeta.yml or vxmeta.yaml; absent files yield the defaults.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("vxmeta.yml");
        let yaml_path = dir.join("vxmeta.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration
    ///
    /// Schema and table names are interpolated into DDL (identifiers cannot
    /// be bound as statement parameters), so they must be plain identifiers.
    pub fn validate(&self) -> CoreResult<()> {
        for (field, value) in [
            ("metadata_schema", &self.metadata_schema),
            ("fact_table", &self.fact_table),
        ] {
            if !is_identifier(value) {
                return Err(CoreError::ConfigInvalid {
                    message: format!(
                        "{field} must be a plain identifier (letters, digits, underscore): '{value}'"
                    ),
                });
            }
        }
        if self.database_prefix.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database_prefix cannot be empty".to_string(),
            });
        }
        if self.level_prefix.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "level_prefix cannot be empty".to_string(),
            });
        }
        if self.cardinality_limit == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "cardinality_limit must be positive".to_string(),
            });
        }
        Ok(())
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !s.starts_with(|c: char| c.is_ascii_digit())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

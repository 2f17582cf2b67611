//! Error types for vxmeta-core

use thiserror::Error;

/// Core error type for vxmeta
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: IO error with file path context
    #[error("[E003] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E004: Config YAML parse error
    #[error("[E004] Failed to parse config: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// E005: Collection list encode/decode error
    #[error("[E005] List codec error: {message}")]
    ListCodec { message: String },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::ListCodec {
            message: err.to_string(),
        }
    }
}

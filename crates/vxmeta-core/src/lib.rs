//! vxmeta-core - Core types for the vxmeta metadata pipeline
//!
//! Holds the configuration loader, the metadata domain model, and the pure
//! helpers (level ordering, forecast-lead normalization, collection list
//! codec) shared by the pipeline and CLI crates.

pub mod codec;
pub mod config;
pub mod error;
pub mod leads;
pub mod levels;
pub mod metadata;

pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use metadata::{
    CoverageGroups, DefaultProfile, MetadataRow, TooLargeEntry, DEFAULT_LEAD_MARKER,
    UNGROUPED_LABEL,
};

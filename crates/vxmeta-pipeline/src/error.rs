//! Error types for the metadata pipeline.

use thiserror::Error;
use vxmeta_core::CoreError;
use vxmeta_db::StoreError;

/// Pipeline errors.
///
/// All variants are fatal to the run; operational recovery is re-running
/// the batch job.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Aggregation failed (P001).
    #[error("[P001] Aggregation failed: {0}")]
    AggregationError(String),

    /// Reconciliation failed (P002).
    #[error("[P002] Reconciliation failed: {0}")]
    ReconcileError(String),

    /// Store operation failed (P003).
    #[error("[P003] Store operation failed: {0}")]
    Store(#[from] StoreError),

    /// Core helper failed (P004).
    #[error("[P004] {0}")]
    Core(#[from] CoreError),
}

/// Result type alias for [`PipelineError`].
pub type PipelineResult<T> = Result<T, PipelineError>;

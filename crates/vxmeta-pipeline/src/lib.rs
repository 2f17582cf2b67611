//! Metadata pipeline for vxmeta.
//!
//! Aggregates per-database/per-model descriptive metadata from verification
//! databases into a dev snapshot, then reconciles the snapshot into the
//! durable production tables. The pipeline is a periodic batch job with a
//! single logical writer; any store failure aborts the run.

pub mod aggregate;
pub mod defaults;
pub mod driver;
pub mod error;
pub mod reconcile;
pub mod schema;
pub mod snapshot;

pub use driver::{run, PipelineReport};
pub use error::{PipelineError, PipelineResult};
pub use schema::Tables;

//! # rowdelta
//!
//! Key-based reconciliation of two delimited text tables. Rows are matched
//! by a composite key rather than by position and classified as added,
//! removed, modified or unchanged.

pub mod cache;
pub mod cli;
pub mod commands;
pub mod compare;
pub mod config;
pub mod delta;
pub mod error;
pub mod hash;
pub mod io;
pub mod output;
pub mod progress;
pub mod reconcile;
pub mod summary;

pub use config::{DeltaFormat, DiffConfig};
pub use error::{Result, RowDeltaError};
pub use reconcile::Reconciler;
pub use summary::RunSummary;

/// One record: raw byte fields, positional
pub type Row = csv::ByteRecord;

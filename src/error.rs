//! Error types for the crate.
//!
//! Most failures are plain `anyhow` errors with context attached. The failures that a caller may
//! need to tell apart (a configuration gap, a missing cache entry, a row that violates a record
//! invariant) are `PipelineError` values carried inside the `anyhow::Error` and can be recovered
//! with `downcast_ref`.

use crate::model::ValidationError;
use crate::sources::SourceKind;
use std::path::PathBuf;

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised by the pipeline itself, as opposed to the transport or the filesystem.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// No `ColumnLayout` is registered for the year. This is a code/config gap, not bad data.
    #[error("No column layout is registered for year {year}")]
    NoLayout { year: i32 },

    /// The year was requested but no spreadsheet source is registered for it.
    #[error("No spreadsheet source is registered for year {year}")]
    NoSource { year: i32 },

    /// The cache is required but holds no entry for this year and source kind.
    #[error("No cached {kind} data for year {year} at '{}'", path.display())]
    CacheMiss {
        year: i32,
        kind: SourceKind,
        path: PathBuf,
    },

    /// A fully parsed row violated a record invariant.
    #[error("Invalid {kind} row {row_index} for year {year}: {source}")]
    Invalid {
        year: i32,
        kind: SourceKind,
        row_index: usize,
        #[source]
        source: ValidationError,
    },
}

//! Row transformers: one raw sheet row in, zero or one validated record out.
mod expense;
mod reservation;

pub use expense::{transform_expense, transform_expenses, FALLBACK_EXPENSE_YEAR};
pub use reservation::{transform_rentals, transform_reservation};

use crate::error::PipelineError;
use crate::model::{RowFailure, ValidationError};
use crate::sources::SourceKind;
use crate::{Result, ValidationPolicy};
use tracing::warn;

/// The records produced from one sheet, plus the rows that failed validation when failures are
/// being collected.
#[derive(Debug, Clone, PartialEq)]
pub struct Rows<T> {
    pub records: Vec<T>,
    pub failures: Vec<RowFailure>,
}

impl<T> Rows<T> {
    /// Runs `transform` over `grid` starting at row `start`. Skipped rows are dropped. A
    /// `ValidationError` either aborts or is recorded, depending on `policy`; any other error
    /// propagates.
    pub(crate) fn collect<F>(
        grid: &[Vec<String>],
        start: usize,
        year: i32,
        kind: SourceKind,
        policy: ValidationPolicy,
        mut transform: F,
    ) -> Result<Self>
    where
        F: FnMut(&[String]) -> Result<Option<T>>,
    {
        let mut records = Vec::new();
        let mut failures = Vec::new();
        for (row_index, row) in grid.iter().enumerate().skip(start) {
            let error = match transform(row) {
                Ok(Some(record)) => {
                    records.push(record);
                    continue;
                }
                Ok(None) => continue,
                Err(e) => e.downcast::<ValidationError>()?,
            };
            match policy {
                ValidationPolicy::Abort => {
                    return Err(PipelineError::Invalid {
                        year,
                        kind,
                        row_index,
                        source: error,
                    }
                    .into())
                }
                ValidationPolicy::Collect => {
                    warn!("Invalid {kind} row {row_index} for {year}: {error}");
                    failures.push(RowFailure {
                        year,
                        kind,
                        row_index,
                        error,
                    });
                }
            }
        }
        Ok(Self { records, failures })
    }
}

/// Returns the cell at `index`, or `""` when the layout has no such column or the row is short.
fn cell(row: &[String], index: Option<usize>) -> &str {
    index
        .and_then(|ix| row.get(ix))
        .map(String::as_str)
        .unwrap_or_default()
}

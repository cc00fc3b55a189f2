//! Implements the `Sheet` trait over CSV exports on disk.

use crate::api::{parse_csv, Sheet};
use crate::{utils, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Reads sheets that were exported as CSV to `<data_dir>/<spreadsheet_id>/<sheet_name>.csv`.
#[derive(Debug, Clone)]
pub struct CsvSheet {
    data_dir: PathBuf,
}

impl CsvSheet {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The path of the export for `sheet_name` in `spreadsheet_id`.
    pub fn path(&self, spreadsheet_id: &str, sheet_name: &str) -> PathBuf {
        self.data_dir
            .join(spreadsheet_id)
            .join(format!("{sheet_name}.csv"))
    }
}

#[async_trait::async_trait]
impl Sheet for CsvSheet {
    async fn get(&mut self, spreadsheet_id: &str, sheet_name: &str) -> Result<Vec<Vec<String>>> {
        let path = self.path(spreadsheet_id, sheet_name);
        trace!("get for {sheet_name} from {}", path.display());
        let content = utils::read(&path)
            .await
            .with_context(|| format!("Failed to fetch {sheet_name} sheet data"))?;
        parse_csv(&content).with_context(|| format!("Unable to parse CSV at {}", path.display()))
    }
}

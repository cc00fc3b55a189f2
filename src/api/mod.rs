//! The transport seam: where raw sheet grids come from.
//!
//! The pipeline only ever sees a `Sheet`, which hands back a sheet's cells as rows of strings.
//! `CsvSheet` reads exported CSV files from the data directory. `TestSheet` holds seeded data in
//! memory so that the program can be run without any spreadsheet at all.

mod csv_sheet;
mod test_sheet;

pub use csv_sheet::CsvSheet;
pub use test_sheet::TestSheet;

use crate::{Config, Result};
use std::io::Cursor;

/// Set this environment variable to a non-empty value to run against the seeded `TestSheet`.
pub const TEST_MODE_ENV: &str = "RENTAL_LEDGER_IN_TEST_MODE";

/// Reads the cells of one sheet of a spreadsheet.
#[async_trait::async_trait]
pub trait Sheet {
    /// Returns every row of `sheet_name` in the spreadsheet `spreadsheet_id`. Cells are the
    /// formatted strings a user would see; rows may be ragged.
    async fn get(&mut self, spreadsheet_id: &str, sheet_name: &str) -> Result<Vec<Vec<String>>>;
}

/// Which `Sheet` implementation to use.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    /// Read CSV exports from the configured data directory.
    #[default]
    Csv,
    /// Use the in-memory, seeded `TestSheet`.
    Test,
}

impl Mode {
    /// `Mode::Test` when `RENTAL_LEDGER_IN_TEST_MODE` is set and non-empty, otherwise
    /// `Mode::Csv`.
    pub fn from_env() -> Self {
        match std::env::var(TEST_MODE_ENV) {
            Ok(value) if !value.is_empty() => Mode::Test,
            _ => Mode::Csv,
        }
    }
}

/// Creates the `Sheet` implementation selected by `mode`.
pub fn sheet(config: &Config, mode: Mode) -> Result<Box<dyn Sheet + Send>> {
    Ok(match mode {
        Mode::Csv => Box::new(CsvSheet::new(config.data_dir())),
        Mode::Test => Box::new(TestSheet::seeded()?),
    })
}

/// Parses CSV text into rows of cells. Every line is data, including the first, and rows may have
/// different lengths.
pub(crate) fn parse_csv(csv_data: &str) -> Result<Vec<Vec<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(csv_data.as_bytes()));

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }
    Ok(rows)
}

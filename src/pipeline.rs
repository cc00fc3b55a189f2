//! Runs extraction and normalization over a set of years and aggregates the results.

use crate::api::Sheet;
use crate::cache::Cache;
use crate::layout::layout_for;
use crate::model::ResultSet;
use crate::sources::{SourceKind, Sources, YearSource};
use crate::transform::{transform_expenses, transform_rentals};
use crate::{Config, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// What to do when a fully parsed row violates a record invariant.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Fail the whole run on the first invalid row.
    #[default]
    Abort,
    /// Keep going and report each invalid row in `ResultSet::failures`.
    Collect,
}

serde_plain::derive_display_from_serialize!(ValidationPolicy);
serde_plain::derive_fromstr_from_deserialize!(ValidationPolicy);

/// Fetches each year's sheets and turns them into a `ResultSet`.
pub struct Pipeline {
    sheet: Box<dyn Sheet + Send>,
    sources: Sources,
    cache: Option<Cache>,
    policy: ValidationPolicy,
}

impl Pipeline {
    /// A pipeline that reads every sheet from `sheet`, without a cache, aborting on invalid rows.
    pub fn new(sheet: Box<dyn Sheet + Send>, sources: Sources) -> Self {
        Self {
            sheet,
            sources,
            cache: None,
            policy: ValidationPolicy::default(),
        }
    }

    /// A pipeline that uses the sources, cache and validation policy of `config`.
    pub fn from_config(config: &Config, sheet: Box<dyn Sheet + Send>) -> Self {
        Self::new(sheet, config.sources().clone())
            .with_cache(config.cache())
            .with_policy(config.validation_policy())
    }

    pub fn with_cache(mut self, cache: Cache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn sources(&self) -> &Sources {
        &self.sources
    }

    /// Processes `years`, or every registered year when `None`. Years are de-duplicated and
    /// processed in ascending order.
    ///
    /// # Errors
    /// - `PipelineError::NoSource` when a requested year is not registered; nothing is fetched
    /// - `PipelineError::NoLayout` when a year with a rentals sheet has no column layout; nothing
    ///   is fetched
    /// - `PipelineError::Invalid` for the first invalid row under `ValidationPolicy::Abort`
    /// - `PipelineError::CacheMiss` when the cache is required and an entry is missing
    /// - Any transport error
    pub async fn run(&mut self, years: Option<&[i32]>) -> Result<ResultSet> {
        let years: BTreeSet<i32> = match years {
            Some(years) => years.iter().copied().collect(),
            None => self.sources.years().into_iter().collect(),
        };
        let sources = years
            .iter()
            .map(|&year| self.sources.get(year).cloned())
            .collect::<Result<Vec<YearSource>>>()?;
        for source in &sources {
            if source.sheet(SourceKind::Rentals).is_some() {
                layout_for(source.year)?;
            }
        }

        let mut reservations = Vec::new();
        let mut expenses = Vec::new();
        let mut failures = Vec::new();
        for source in &sources {
            let year = source.year;
            if let Some(sheet_name) = source.sheet(SourceKind::Rentals) {
                debug!("Loading rentals for {year} from '{sheet_name}'");
                let grid = self.fetch(source, SourceKind::Rentals, sheet_name).await?;
                let rows = transform_rentals(&grid, year, self.policy)?;
                debug!("{year}: {} reservations", rows.records.len());
                reservations.extend(rows.records);
                failures.extend(rows.failures);
            }
            if let Some(sheet_name) = source.sheet(SourceKind::Expenses) {
                debug!(
                    "Loading {} expenses for {year} from '{sheet_name}'",
                    source.expenses_format
                );
                let grid = self.fetch(source, SourceKind::Expenses, sheet_name).await?;
                let rows = transform_expenses(&grid, year, source.expenses_format, self.policy)?;
                debug!("{year}: {} expenses", rows.records.len());
                expenses.extend(rows.records);
                failures.extend(rows.failures);
            }
        }
        Ok(ResultSet::new(reservations, expenses, failures))
    }

    /// Processes a single year.
    pub async fn run_year(&mut self, year: i32) -> Result<ResultSet> {
        self.run(Some(&[year])).await
    }

    async fn fetch(
        &mut self,
        source: &YearSource,
        kind: SourceKind,
        sheet_name: &str,
    ) -> Result<Vec<Vec<String>>> {
        let sheet = self.sheet.as_mut();
        match &self.cache {
            Some(cache) => {
                cache
                    .fetch(sheet, source.year, kind, &source.spreadsheet_id, sheet_name)
                    .await
            }
            None => sheet.get(&source.spreadsheet_id, sheet_name).await,
        }
    }
}

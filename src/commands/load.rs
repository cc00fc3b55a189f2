use crate::api::{self, Mode};
use crate::commands::Out;
use crate::model::{ResultSet, RowFailure};
use crate::pipeline::Pipeline;
use crate::{Config, Result};
use serde::Serialize;

/// Per-year totals of one load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSummary {
    pub year: i32,
    pub reservations: usize,
    /// Reservations that were paid stays, as opposed to owner use or blocked dates.
    pub rentals: usize,
    pub rental_revenue: f64,
    pub expenses: usize,
    pub expense_total: f64,
}

/// The structured output of `load`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadSummary {
    pub years: Vec<YearSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<RowFailure>,
}

impl LoadSummary {
    fn new(result: &ResultSet) -> Self {
        let reservations = result.reservations_by_year();
        let expenses = result.expenses_by_year();
        let revenue = result.rental_revenue_by_year();
        let expense_totals = result.expense_total_by_year();
        let years = result
            .years()
            .into_iter()
            .map(|year| {
                let booked = reservations.get(&year).map(Vec::as_slice).unwrap_or_default();
                YearSummary {
                    year,
                    reservations: booked.len(),
                    rentals: booked.iter().filter(|r| r.is_rental()).count(),
                    rental_revenue: revenue.get(&year).copied().unwrap_or_default(),
                    expenses: expenses.get(&year).map(Vec::len).unwrap_or_default(),
                    expense_total: expense_totals.get(&year).copied().unwrap_or_default(),
                }
            })
            .collect();
        Self {
            years,
            failures: result.failures().to_vec(),
        }
    }

    fn message(&self) -> String {
        let mut lines = vec![format!("Loaded {} years", self.years.len())];
        for y in &self.years {
            lines.push(format!(
                "{}: {} reservations ({} rentals) ${} revenue, {} expenses ${}",
                y.year,
                y.reservations,
                y.rentals,
                format_num::format_num!(",.2", y.rental_revenue),
                y.expenses,
                format_num::format_num!(",.2", y.expense_total),
            ));
        }
        if !self.failures.is_empty() {
            lines.push(format!("{} rows failed validation", self.failures.len()));
        }
        lines.join("\n")
    }
}

/// Runs the pipeline over `years` (every registered year when `None`) and summarizes the result
/// per year.
pub async fn load(config: &Config, mode: Mode, years: Option<&[i32]>) -> Result<Out<LoadSummary>> {
    let sheet = api::sheet(config, mode)?;
    let mut pipeline = Pipeline::from_config(config, sheet);
    let result = pipeline.run(years).await?;
    let summary = LoadSummary::new(&result);
    Ok(Out::new(summary.message(), summary))
}

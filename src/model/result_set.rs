//! The aggregate output of one pipeline run.

use crate::model::{Expense, Reservation, ValidationError};
use crate::sources::SourceKind;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::Display;

/// All records produced by one pipeline run.
///
/// The by-year views are computed on demand and key each record by its own `year` field, never by
/// the year that was being processed when it was produced.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ResultSet {
    reservations: Vec<Reservation>,
    expenses: Vec<Expense>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failures: Vec<RowFailure>,
}

/// A row that failed validation while the pipeline was collecting failures instead of aborting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RowFailure {
    pub year: i32,
    pub kind: SourceKind,
    /// Zero-based index of the row within the fetched sheet.
    pub row_index: usize,
    #[serde(serialize_with = "serialize_display")]
    pub error: ValidationError,
}

impl ResultSet {
    pub(crate) fn new(
        reservations: Vec<Reservation>,
        expenses: Vec<Expense>,
        failures: Vec<RowFailure>,
    ) -> Self {
        Self {
            reservations,
            expenses,
            failures,
        }
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Rows that failed validation. Always empty when the run used `ValidationPolicy::Abort`.
    pub fn failures(&self) -> &[RowFailure] {
        &self.failures
    }

    pub fn reservations_by_year(&self) -> BTreeMap<i32, Vec<&Reservation>> {
        group_by_year(&self.reservations, Reservation::year)
    }

    pub fn expenses_by_year(&self) -> BTreeMap<i32, Vec<&Expense>> {
        group_by_year(&self.expenses, Expense::year)
    }

    /// Every year that has at least one reservation or expense, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self
            .reservations
            .iter()
            .map(Reservation::year)
            .chain(self.expenses.iter().map(Expense::year))
            .collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Sum of `total_revenue` over actual rentals (owner use and blocked dates excluded), per year.
    pub fn rental_revenue_by_year(&self) -> BTreeMap<i32, f64> {
        let mut totals = BTreeMap::new();
        for r in self.reservations.iter().filter(|r| r.is_rental()) {
            *totals.entry(r.year()).or_insert(0.0) += r.total_revenue();
        }
        totals
    }

    /// Sum of expense amounts per year.
    pub fn expense_total_by_year(&self) -> BTreeMap<i32, f64> {
        let mut totals = BTreeMap::new();
        for e in &self.expenses {
            *totals.entry(e.year()).or_insert(0.0) += e.amount();
        }
        totals
    }
}

fn group_by_year<T>(records: &[T], year: impl Fn(&T) -> i32) -> BTreeMap<i32, Vec<&T>> {
    let mut map: BTreeMap<i32, Vec<&T>> = BTreeMap::new();
    for record in records {
        map.entry(year(record)).or_default().push(record);
    }
    map
}

fn serialize_display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

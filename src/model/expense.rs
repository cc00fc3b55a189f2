use crate::model::validation::{check_finite, check_year};
use crate::model::ValidationError;
use serde::Serialize;

/// A normalized expense. The amount is signed: refunds and corrections are negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Expense {
    year: i32,
    expense_type: String,
    expense_type_raw: String,
    amount: f64,
}

impl Expense {
    /// Validates the year and amount and constructs an `Expense`.
    pub fn new(
        year: i32,
        expense_type: impl Into<String>,
        expense_type_raw: impl Into<String>,
        amount: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            year: check_year(year)?,
            expense_type: expense_type.into(),
            expense_type_raw: expense_type_raw.into(),
            amount: check_finite("amount", amount)?,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The canonical category, or the lowercased label when no mapping exists.
    pub fn expense_type(&self) -> &str {
        &self.expense_type
    }

    pub fn expense_type_raw(&self) -> &str {
        &self.expense_type_raw
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
}

use crate::model::validation::{check_count, check_non_negative, check_year};
use crate::model::{Platform, ValidationError};
use chrono::NaiveDate;
use serde::Serialize;

/// A normalized reservation.
///
/// A `Reservation` can only be obtained through `Reservation::new`, which enforces the record
/// invariants, so every value in circulation is valid. Fields are read through getters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Reservation {
    year: i32,
    platform: Platform,
    platform_raw: String,
    check_in: NaiveDate,
    check_out: NaiveDate,
    nights: u64,
    guest_name: String,
    guest_count: u64,
    total_revenue: f64,
    cleaning_fee: f64,
    is_rental: bool,
}

/// The unvalidated fields of a `Reservation`. Counts are signed here so that a negative number
/// read from a sheet reaches validation instead of being silently clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub year: i32,
    pub platform: Platform,
    pub platform_raw: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub guest_name: String,
    pub guest_count: i64,
    pub total_revenue: f64,
    pub cleaning_fee: f64,
    pub is_rental: bool,
}

impl Reservation {
    /// Validates `fields` and constructs a `Reservation`.
    ///
    /// # Errors
    /// - the year is outside of `MIN_YEAR..=MAX_YEAR`
    /// - `check_out` is before `check_in`
    /// - `guest_name` is empty after trimming
    /// - `nights` or `guest_count` is negative
    /// - `total_revenue` or `cleaning_fee` is negative or not finite
    pub fn new(fields: NewReservation) -> Result<Self, ValidationError> {
        let year = check_year(fields.year)?;
        if fields.check_out < fields.check_in {
            return Err(ValidationError::CheckOutBeforeCheckIn {
                check_in: fields.check_in,
                check_out: fields.check_out,
            });
        }
        if fields.guest_name.trim().is_empty() {
            return Err(ValidationError::EmptyGuestName);
        }
        Ok(Self {
            year,
            platform: fields.platform,
            platform_raw: fields.platform_raw,
            check_in: fields.check_in,
            check_out: fields.check_out,
            nights: check_count("nights", fields.nights)?,
            guest_name: fields.guest_name,
            guest_count: check_count("guest_count", fields.guest_count)?,
            total_revenue: check_non_negative("total_revenue", fields.total_revenue)?,
            cleaning_fee: check_non_negative("cleaning_fee", fields.cleaning_fee)?,
            is_rental: fields.is_rental,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// The platform label exactly as it appeared in the sheet.
    pub fn platform_raw(&self) -> &str {
        &self.platform_raw
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// The number of nights recorded in the sheet. This is not derived from the dates and may
    /// disagree with them.
    pub fn nights(&self) -> u64 {
        self.nights
    }

    pub fn guest_name(&self) -> &str {
        &self.guest_name
    }

    pub fn guest_count(&self) -> u64 {
        self.guest_count
    }

    pub fn total_revenue(&self) -> f64 {
        self.total_revenue
    }

    pub fn cleaning_fee(&self) -> f64 {
        self.cleaning_fee
    }

    /// False for owner use and for blocked dates.
    pub fn is_rental(&self) -> bool {
        self.is_rental
    }
}

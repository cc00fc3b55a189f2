use chrono::NaiveDate;

/// The first year for which records are accepted.
pub const MIN_YEAR: i32 = 2017;

/// The last year for which records are accepted.
pub const MAX_YEAR: i32 = 2030;

/// A record invariant that a fully parsed row failed to satisfy.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("year {0} is outside of {MIN_YEAR}..={MAX_YEAR}")]
    YearOutOfRange(i32),

    #[error("check_out {check_out} is before check_in {check_in}")]
    CheckOutBeforeCheckIn {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("guest_name is empty")]
    EmptyGuestName,

    #[error("{field} must not be negative, got {value}")]
    NegativeCount { field: &'static str, value: i64 },

    #[error("{field} must not be negative, got {value}")]
    NegativeAmount { field: &'static str, value: f64 },

    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
}

pub(super) fn check_year(year: i32) -> Result<i32, ValidationError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(ValidationError::YearOutOfRange(year))
    }
}

pub(super) fn check_count(field: &'static str, value: i64) -> Result<u64, ValidationError> {
    u64::try_from(value).map_err(|_| ValidationError::NegativeCount { field, value })
}

pub(super) fn check_finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { field, value })
    }
}

pub(super) fn check_non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = check_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::NegativeAmount { field, value });
    }
    Ok(value)
}

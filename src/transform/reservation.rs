use crate::layout::layout_for;
use crate::model::{NewReservation, Platform, Reservation};
use crate::normalize::normalize_platform;
use crate::parse::{parse_count, parse_currency, parse_date};
use crate::sources::SourceKind;
use crate::transform::{cell, Rows};
use crate::{Result, ValidationPolicy};
use chrono::{Datelike, NaiveDate};

/// Guest names that mark header and summary rows rather than bookings.
const SKIP_NAMES: &[&str] = &["name", "total", "grand total", ""];

/// Platform used when the layout has no platform column at all.
const NO_PLATFORM_COLUMN: &str = "offline";

/// Transforms one row of a rentals sheet into a `Reservation`.
///
/// Returns `Ok(None)` for rows that are not bookings: blank or header/summary guest names and
/// rows without a parseable check-in date.
///
/// # Errors
/// - `PipelineError::NoLayout` when no layout is registered for `year`
/// - `ValidationError` when the parsed row violates a `Reservation` invariant
pub fn transform_reservation(row: &[String], year: i32) -> Result<Option<Reservation>> {
    let layout = layout_for(year)?;

    let guest_name = cell(row, layout.guest_name).trim();
    if SKIP_NAMES.contains(&guest_name.to_lowercase().as_str()) {
        return Ok(None);
    }

    let platform_raw = match layout.platform {
        Some(_) => cell(row, layout.platform).trim(),
        None => NO_PLATFORM_COLUMN,
    };
    let platform = normalize_platform(Some(platform_raw));

    let Some(check_in) = parse_date(cell(row, layout.check_in)) else {
        return Ok(None);
    };
    let check_out = parse_date(cell(row, layout.check_out)).unwrap_or(check_in);
    let check_out = correct_wraparound(check_in, check_out);

    let reservation = Reservation::new(NewReservation {
        year,
        platform,
        platform_raw: platform_raw.to_string(),
        check_in,
        check_out,
        nights: parse_count(cell(row, layout.nights)),
        guest_name: guest_name.to_string(),
        guest_count: parse_count(cell(row, layout.guest_count)),
        total_revenue: parse_currency(cell(row, layout.total_revenue)),
        cleaning_fee: parse_currency(cell(row, layout.cleaning_fee)),
        is_rental: is_rental(platform, guest_name),
    })?;
    Ok(Some(reservation))
}

/// Transforms every data row of a rentals sheet, skipping the header rows declared by the year's
/// layout.
pub fn transform_rentals(
    grid: &[Vec<String>],
    year: i32,
    policy: ValidationPolicy,
) -> Result<Rows<Reservation>> {
    let layout = layout_for(year)?;
    Rows::collect(
        grid,
        layout.data_start_row,
        year,
        SourceKind::Rentals,
        policy,
        |row| transform_reservation(row, year),
    )
}

/// A stay from December into January is often recorded without rolling the check-out year
/// forward. Moves such a check-out into the following year; any other inversion is left alone.
fn correct_wraparound(check_in: NaiveDate, check_out: NaiveDate) -> NaiveDate {
    if check_out < check_in && check_out.month() == 1 && check_in.month() == 12 {
        check_out
            .with_year(check_in.year() + 1)
            .unwrap_or(check_out)
    } else {
        check_out
    }
}

fn is_rental(platform: Platform, guest_name: &str) -> bool {
    platform != Platform::Owner && !guest_name.to_lowercase().contains("blocked")
}

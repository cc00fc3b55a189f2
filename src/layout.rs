//! Column layouts of the rentals sheets, per year.
//!
//! The rentals sheet was reorganized several times over the years. Each revision is one entry in
//! `LAYOUTS`, so supporting a new year is a data edit.

use crate::error::PipelineError;
use crate::Result;
use serde::Serialize;

/// The zero-based column positions of the fields of a rentals sheet, plus where its header and
/// data rows start. `None` means the sheet has no such column and a default is used instead.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub struct ColumnLayout {
    pub platform: Option<usize>,
    pub check_in: Option<usize>,
    pub check_out: Option<usize>,
    pub nights: Option<usize>,
    pub guest_name: Option<usize>,
    pub guest_count: Option<usize>,
    pub total_revenue: Option<usize>,
    pub cleaning_fee: Option<usize>,
    pub header_row: usize,
    pub data_start_row: usize,
}

impl ColumnLayout {
    /// The layout shared by 2019 through 2025, which only differ in where the money columns are.
    const fn standard(total_revenue: usize, cleaning_fee: usize) -> Self {
        Self {
            platform: Some(0),
            check_in: Some(1),
            check_out: Some(2),
            nights: Some(3),
            guest_name: Some(4),
            guest_count: Some(5),
            total_revenue: Some(total_revenue),
            cleaning_fee: Some(cleaning_fee),
            header_row: 0,
            data_start_row: 1,
        }
    }
}

/// One layout revision and the inclusive range of years it applies to.
#[derive(Debug, Clone, Copy)]
struct LayoutEntry {
    first_year: i32,
    last_year: i32,
    layout: ColumnLayout,
}

const LAYOUTS: &[LayoutEntry] = &[
    LayoutEntry {
        first_year: 2024,
        last_year: 2025,
        layout: ColumnLayout::standard(13, 14),
    },
    LayoutEntry {
        first_year: 2022,
        last_year: 2023,
        layout: ColumnLayout::standard(12, 14),
    },
    LayoutEntry {
        first_year: 2021,
        last_year: 2021,
        layout: ColumnLayout::standard(10, 12),
    },
    LayoutEntry {
        first_year: 2019,
        last_year: 2020,
        layout: ColumnLayout::standard(12, 14),
    },
    LayoutEntry {
        first_year: 2018,
        last_year: 2018,
        layout: ColumnLayout {
            platform: Some(1),
            check_in: Some(2),
            check_out: Some(3),
            nights: Some(4),
            guest_name: Some(5),
            guest_count: Some(6),
            total_revenue: Some(11),
            cleaning_fee: None,
            header_row: 1,
            data_start_row: 2,
        },
    },
    LayoutEntry {
        first_year: 2017,
        last_year: 2017,
        layout: ColumnLayout {
            // no platform column in 2017, every booking is treated as offline
            platform: None,
            check_in: Some(0),
            check_out: Some(1),
            nights: Some(2),
            guest_name: Some(3),
            guest_count: None,
            total_revenue: Some(11),
            cleaning_fee: None,
            header_row: 1,
            data_start_row: 2,
        },
    },
];

/// Returns the layout of the rentals sheet for `year`, if one is registered.
pub fn find_layout(year: i32) -> Option<&'static ColumnLayout> {
    LAYOUTS
        .iter()
        .find(|entry| (entry.first_year..=entry.last_year).contains(&year))
        .map(|entry| &entry.layout)
}

/// Returns the layout of the rentals sheet for `year`.
///
/// # Errors
/// `PipelineError::NoLayout` when no layout covers `year`.
pub fn layout_for(year: i32) -> Result<&'static ColumnLayout> {
    find_layout(year).ok_or_else(|| PipelineError::NoLayout { year }.into())
}

/// Every year covered by a layout, ascending.
pub fn layout_years() -> Vec<i32> {
    let mut years: Vec<i32> = LAYOUTS
        .iter()
        .flat_map(|entry| entry.first_year..=entry.last_year)
        .collect();
    years.sort_unstable();
    years
}

//! Implements the `Sheet` trait using in-memory data for testing purposes.
//!
//! Note: this is compiled even in the "production" version of this app so that we can run the whole
//! app, top-to-bottom, without any spreadsheet exports.

use crate::api::{parse_csv, Sheet};
use crate::sources::{SourceKind, Sources};
use crate::Result;
use anyhow::Context;
use std::collections::HashMap;
use tracing::trace;

/// An implementation of the `Sheet` trait that holds its data in memory. `TestSheet::seeded` fills
/// it with a small rentals and expenses sheet for every year of the default source registry.
#[derive(Debug, Clone)]
pub struct TestSheet {
    data: HashMap<(String, String), Vec<Vec<String>>>,
}

impl TestSheet {
    /// An empty `TestSheet`.
    pub fn empty() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    /// Adds or replaces the rows of `sheet_name` in `spreadsheet_id`.
    pub fn insert<R, C>(&mut self, spreadsheet_id: &str, sheet_name: &str, rows: R)
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        self.data
            .insert((spreadsheet_id.to_string(), sheet_name.to_string()), rows);
    }

    /// Builds the seeded sheet. Seed data is a compile-time constant, so a parse failure here is a
    /// bug in this module.
    pub fn seeded() -> Result<Self> {
        let mut data = HashMap::new();
        for source in Sources::default().iter() {
            for kind in [SourceKind::Rentals, SourceKind::Expenses] {
                let (Some(sheet_name), Some(csv)) = (source.sheet(kind), seed(source.year, kind))
                else {
                    continue;
                };
                let rows = parse_csv(csv)
                    .with_context(|| format!("Bad seed data for {kind} {}", source.year))?;
                data.insert(
                    (source.spreadsheet_id.clone(), sheet_name.to_string()),
                    rows,
                );
            }
        }
        Ok(Self { data })
    }
}

#[async_trait::async_trait]
impl Sheet for TestSheet {
    async fn get(&mut self, spreadsheet_id: &str, sheet_name: &str) -> Result<Vec<Vec<String>>> {
        trace!("get for {sheet_name} in {spreadsheet_id}");
        self.data
            .get(&(spreadsheet_id.to_string(), sheet_name.to_string()))
            .with_context(|| format!("Sheet '{sheet_name}' not found in '{spreadsheet_id}'"))
            .cloned()
    }
}

/// The seed CSV for the `kind` sheet of `year`.
fn seed(year: i32, kind: SourceKind) -> Option<&'static str> {
    match (kind, year) {
        (SourceKind::Rentals, 2025) => Some(RENTALS_2025),
        (SourceKind::Rentals, 2024) => Some(RENTALS_2024),
        (SourceKind::Rentals, 2023) => Some(RENTALS_2023),
        (SourceKind::Rentals, 2022) => Some(RENTALS_2022),
        (SourceKind::Rentals, 2021) => Some(RENTALS_2021),
        (SourceKind::Rentals, 2020) => Some(RENTALS_2020),
        (SourceKind::Rentals, 2019) => Some(RENTALS_2019),
        (SourceKind::Rentals, 2018) => Some(RENTALS_2018),
        (SourceKind::Rentals, 2017) => Some(RENTALS_2017),
        (SourceKind::Expenses, 2023..=2025) => Some(EXPENSES_RECENT),
        (SourceKind::Expenses, 2020..=2022) => Some(EXPENSES_EARLY),
        _ => None,
    }
}

const RENTALS_2025: &str = r##"Platform,Check In,Check Out,Nights,Name,Guests,Rate,Subtotal,Tax,Fees,Payout,Notes,Paid,Total,Cleaning
Airbnb,13-Jun-25,20-Jun-25,7,Priya Natarajan,4,$350,"$2,450.00",,,,,Y,"$2,750.00",$300.00
VRBO,4-Jul-25,11-Jul-25,7,Tom Becker,6,$400,"$2,800.00",,,,,Y,"$3,100.00",$300.00
Self,15-Aug-25,22-Aug-25,7,Blocked - owner week,,,,,,,,,,
,,,,Total,,,,,,,,,"$5,850.00",$600.00
"##;

const RENTALS_2024: &str = r##"Platform,Check In,Check Out,Nights,Name,Guests,Rate,Subtotal,Tax,Fees,Payout,Notes,Paid,Total,Cleaning
Airbnb,4-Jun-24,8-Jun-24,4,Jane Smith,6,$400,"$1,600.00",,,,,Y,"$1,900.00",$300.00
VRBO,28-Dec-24,2-Jan-24,5,Marcus Lee,5,$380,"$1,900.00",,,,,Y,"$2,200.00",$300.00
Friend,10-Sep-24,12-Sep-24,2,Dana Ortiz,2,,,,,,,,$0.00,
,,,,Total,,,,,,,,,"$4,100.00",$600.00
"##;

const RENTALS_2023: &str = r##"Platform,Check In,Check Out,Nights,Name,Guests,Rate,Subtotal,Tax,Fees,Payout,Notes,Total,Paid,Cleaning
Airbnb,7-Jul-23,14-Jul-23,7,Olivia Brown,4,$320,"$2,240.00",,,,,"$2,540.00",Y,$300.00
Booking.com,1-Aug-23,5-Aug-23,4,Henrik Larsen,2,$300,"$1,200.00",,,,,"$1,450.00",Y,$250.00
"##;

const RENTALS_2022: &str = r##"Platform,Check In,Check Out,Nights,Name,Guests,Rate,Subtotal,Tax,Fees,Payout,Notes,Total,Paid,Cleaning
Airbnb,18-Jun-22,25-Jun-22,7,Sam Carter,5,$300,"$2,100.00",,,,,"$2,400.00",Y,$300.00
Self,1-Sep-22,8-Sep-22,7,Owner stay,,,,,,,,,,
"##;

const RENTALS_2021: &str = r##"Platform,Check In,Check Out,Nights,Name,Guests,Rate,Subtotal,Tax,Fees,Total,Notes,Cleaning
HomeAway,3-Jul-21,10-Jul-21,7,Rachel Green,6,$275,"$1,925.00",,,"$2,175.00",,$250.00
"##;

const RENTALS_2020: &str = r##"Platform,Check In,Check Out,Nights,Name,Guests,Rate,Subtotal,Tax,Fees,Payout,Notes,Total,Paid,Cleaning
Airbnb,14-Aug-20,21-Aug-20,7,Chris Evans,4,$250,"$1,750.00",,,,,"$2,000.00",Y,$250.00
"##;

const RENTALS_2019: &str = r##"Platform,Check In,Check Out,Nights,Name,Guests,Rate,Subtotal,Tax,Fees,Payout,Notes,Total,Paid,Cleaning
HomeAway,5-Jul-19,12-Jul-19,7,Maria Garcia,5,$240,"$1,680.00",,,,,"$1,900.00",Y,$220.00
"##;

const RENTALS_2018: &str = r##"Rentals 2018,,,,,,,,,,,
#,Platform,Check In,Check Out,Nights,Name,Guests,Rate,Subtotal,Tax,Fees,Total
1,HomeAway,1-Aug-18,5-Aug-18,4,Pat Quinn,3,$225,$900.00,,,"$1,050.00"
,,,,,Total,,,,,,"$1,050.00"
"##;

const RENTALS_2017: &str = r##"Rentals 2017,,,,,,,,,,,
Check In,Check Out,Nights,Name,Phone,Email,Rate,Subtotal,Tax,Deposit,Paid,Total
9/Jun/17,12/Jun/17,3,Tony Lynn,,,$200,$600.00,,,,$690.00
"##;

const EXPENSES_RECENT: &str = r##"Type,Amount
Cleaning,"$1,200.00"
Assocation,$850.00
Wifi & cable,$720.00
Outdoors ,$310.50
Grand Total,"$3,080.50"
"##;

const EXPENSES_EARLY: &str = r##"Type,Amount
Taxes,"$2,400.00"
Heat (oil),"$1,150.00"
Cleaning ,$900.00
Refund,-$45.00
Grand Total,"$4,405.00"
"##;

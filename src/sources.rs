//! The registry of spreadsheets and sheet names that hold each year's data.

use crate::error::PipelineError;
use crate::Result;
use anyhow::ensure;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The two kinds of sheet that the pipeline reads.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Rentals,
    Expenses,
}

serde_plain::derive_display_from_serialize!(SourceKind);
serde_plain::derive_fromstr_from_deserialize!(SourceKind);

/// The shape of an expenses sheet. Each format has its own row transformer.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseFormat {
    /// `[type, amount]` rows of a pivot table summarizing the year.
    #[default]
    Pivot,
    /// `[year, date, category, description, amount]` rows covering several years.
    MultiYear,
    /// `[category, type, description, amount, month]` rows with the year inside the month label.
    DatedDescription,
}

serde_plain::derive_display_from_serialize!(ExpenseFormat);
serde_plain::derive_fromstr_from_deserialize!(ExpenseFormat);

/// Where one year's data lives.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct YearSource {
    pub year: i32,
    pub spreadsheet_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rentals_sheet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenses_sheet: Option<String>,
    #[serde(default)]
    pub expenses_format: ExpenseFormat,
}

impl YearSource {
    fn new(
        year: i32,
        spreadsheet_id: &str,
        rentals_sheet: &str,
        expenses_sheet: Option<&str>,
    ) -> Self {
        Self {
            year,
            spreadsheet_id: spreadsheet_id.to_string(),
            rentals_sheet: Some(rentals_sheet.to_string()),
            expenses_sheet: expenses_sheet.map(str::to_string),
            expenses_format: ExpenseFormat::Pivot,
        }
    }

    /// The sheet name for `kind`, if this year has one.
    pub fn sheet(&self, kind: SourceKind) -> Option<&str> {
        match kind {
            SourceKind::Rentals => self.rentals_sheet.as_deref(),
            SourceKind::Expenses => self.expenses_sheet.as_deref(),
        }
    }
}

/// The sources of every registered year, keyed by year.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sources(BTreeMap<i32, YearSource>);

impl Sources {
    /// Builds a registry from a list of year sources.
    ///
    /// # Errors
    /// When the same year appears more than once.
    pub fn new(sources: impl IntoIterator<Item = YearSource>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for source in sources {
            let year = source.year;
            ensure!(
                map.insert(year, source).is_none(),
                "The source for year {year} is registered more than once"
            );
        }
        Ok(Self(map))
    }

    /// The source for `year`.
    ///
    /// # Errors
    /// `PipelineError::NoSource` when nothing is registered for `year`.
    pub fn get(&self, year: i32) -> Result<&YearSource> {
        self.0
            .get(&year)
            .ok_or_else(|| PipelineError::NoSource { year }.into())
    }

    /// All registered years, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.0.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &YearSource> {
        self.0.values()
    }
}

const SHEET_2025: &str = "1vJTlvAdimR1qniKr53TxCnfCekxlFCDL3pbB4NN31Os";
const SHEET_2024: &str = "1Ab1evDsuZ_O_bgpv4PkZ_gQEmy5qbkaYoCcej3NH0FQ";
const SHEET_2023: &str = "18JRFnyyfZVpaCV7wDZmWiB3KgSjjIaqUesNo5kpSxLs";
const SHEET_2022: &str = "1OQDxfH_PMlHM3geUofNqUX9V4d13Plhglm1uuJpUEmM";
const SHEET_2021: &str = "16c8YrNcc9XbdA13PfnISJ51aIPGiUSuhANVHl0I3zWo";
const SHEET_2020: &str = "1XJh9PRgm0ImEjhk3uSSq9JC9iLhV0ylEPKflGG_iOJY";
/// 2017 through 2019 share one workbook with a tab per year.
const SHEET_2017_2019: &str = "1o1UXQQcG1hvkDKiLoImyOdFWahudg6yRehXzsqtNlVI";
const EXPENSES_PIVOT: &str = "Expenses Pivot";

impl Default for Sources {
    fn default() -> Self {
        Self(
            [
                YearSource::new(2025, SHEET_2025, "Rentals 25", Some(EXPENSES_PIVOT)),
                YearSource::new(2024, SHEET_2024, "Rentals 24", Some(EXPENSES_PIVOT)),
                YearSource::new(2023, SHEET_2023, "Rentals 23", Some(EXPENSES_PIVOT)),
                YearSource::new(2022, SHEET_2022, "Rentals 22", Some(EXPENSES_PIVOT)),
                YearSource::new(2021, SHEET_2021, "Rentals 21", Some(EXPENSES_PIVOT)),
                YearSource::new(2020, SHEET_2020, "Rentals 20", Some(EXPENSES_PIVOT)),
                YearSource::new(2019, SHEET_2017_2019, "Rentals 19", None),
                YearSource::new(2018, SHEET_2017_2019, "Rentals 18", None),
                YearSource::new(2017, SHEET_2017_2019, "Rentals 17", None),
            ]
            .into_iter()
            .map(|s| (s.year, s))
            .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::find_layout;

    #[test]
    fn test_default_sources() {
        let sources = Sources::default();
        assert_eq!(sources.years(), (2017..=2025).collect::<Vec<_>>());
        let s2024 = sources.get(2024).unwrap();
        assert_eq!(s2024.sheet(SourceKind::Rentals), Some("Rentals 24"));
        assert_eq!(s2024.sheet(SourceKind::Expenses), Some("Expenses Pivot"));
        assert_eq!(s2024.expenses_format, ExpenseFormat::Pivot);
        assert_eq!(sources.get(2019).unwrap().sheet(SourceKind::Expenses), None);
    }

    #[test]
    fn test_every_default_rentals_year_has_a_layout() {
        for source in Sources::default().iter() {
            if source.rentals_sheet.is_some() {
                assert!(find_layout(source.year).is_some(), "{}", source.year);
            }
        }
    }

    #[test]
    fn test_missing_year() {
        let err = Sources::default().get(2016).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::NoSource { year: 2016 })
        ));
    }

    #[test]
    fn test_duplicate_year_rejected() {
        let a = YearSource::new(2024, "a", "Rentals", None);
        let b = YearSource::new(2024, "b", "Rentals", None);
        assert!(Sources::new([a, b]).is_err());
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"[{"year": 2026, "spreadsheet_id": "abc", "expenses_sheet": "Ledger",
            "expenses_format": "multi_year"}]"#;
        let list: Vec<YearSource> = serde_json::from_str(json).unwrap();
        let sources = Sources::new(list).unwrap();
        let s = sources.get(2026).unwrap();
        assert_eq!(s.rentals_sheet, None);
        assert_eq!(s.sheet(SourceKind::Expenses), Some("Ledger"));
        assert_eq!(s.expenses_format, ExpenseFormat::MultiYear);
    }

    #[test]
    fn test_kind_and_format_strings() {
        assert_eq!(SourceKind::Rentals.to_string(), "rentals");
        assert_eq!(
            "dated_description".parse::<ExpenseFormat>().unwrap(),
            ExpenseFormat::DatedDescription
        );
    }
}

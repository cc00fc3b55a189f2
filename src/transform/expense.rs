use crate::model::Expense;
use crate::normalize::{categorize_by_keywords, normalize_expense_type};
use crate::parse::{find_year, parse_currency};
use crate::sources::{ExpenseFormat, SourceKind};
use crate::transform::Rows;
use crate::{Result, ValidationPolicy};

/// Year assigned to dated-description rows whose month label carries no year.
pub const FALLBACK_EXPENSE_YEAR: i32 = 2025;

/// Type labels that mark header and summary rows of a pivot sheet.
const PIVOT_SKIP_TYPES: &[&str] = &["grand total", "total", "type"];

/// Transforms one row of an expenses sheet in the given `format` into an `Expense`.
///
/// Returns `Ok(None)` for header, summary, short and out-of-year rows.
///
/// # Errors
/// `ValidationError` when the parsed row violates an `Expense` invariant.
pub fn transform_expense(
    row: &[String],
    year: i32,
    format: ExpenseFormat,
) -> Result<Option<Expense>> {
    match format {
        ExpenseFormat::Pivot => pivot(row, year),
        ExpenseFormat::MultiYear => multi_year(row, year),
        ExpenseFormat::DatedDescription => dated_description(row),
    }
}

/// Transforms every row of an expenses sheet after its single header row.
pub fn transform_expenses(
    grid: &[Vec<String>],
    year: i32,
    format: ExpenseFormat,
    policy: ValidationPolicy,
) -> Result<Rows<Expense>> {
    Rows::collect(grid, 1, year, SourceKind::Expenses, policy, |row| {
        transform_expense(row, year, format)
    })
}

/// `[type, amount]`
fn pivot(row: &[String], year: i32) -> Result<Option<Expense>> {
    let [raw_type, amount, ..] = row else {
        return Ok(None);
    };
    let label = raw_type.trim();
    if label.is_empty() || PIVOT_SKIP_TYPES.contains(&label.to_lowercase().as_str()) {
        return Ok(None);
    }
    let expense = Expense::new(
        year,
        normalize_expense_type(raw_type),
        raw_type.as_str(),
        parse_currency(amount),
    )?;
    Ok(Some(expense))
}

/// `[year, date, category, description, amount]`
fn multi_year(row: &[String], year: i32) -> Result<Option<Expense>> {
    let [row_year, _date, category, description, amount, ..] = row else {
        return Ok(None);
    };
    let Ok(row_year) = row_year.trim().parse::<i32>() else {
        return Ok(None);
    };
    if row_year != year {
        return Ok(None);
    }
    // uncategorized rows fall back to their description
    let (expense_type, raw) = if category.trim().is_empty() {
        (categorize_by_keywords(description).to_string(), description)
    } else {
        (normalize_expense_type(category), category)
    };
    let expense = Expense::new(row_year, expense_type, raw.as_str(), parse_currency(amount))?;
    Ok(Some(expense))
}

/// `[category, type, description, amount, month]`
fn dated_description(row: &[String]) -> Result<Option<Expense>> {
    let [_category, raw_type, _description, amount, month, ..] = row else {
        return Ok(None);
    };
    let label = raw_type.trim();
    if label.is_empty() || label.eq_ignore_ascii_case("type") {
        return Ok(None);
    }
    let year = find_year(month).unwrap_or(FALLBACK_EXPENSE_YEAR);
    let expense = Expense::new(
        year,
        normalize_expense_type(raw_type),
        raw_type.as_str(),
        parse_currency(amount),
    )?;
    Ok(Some(expense))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ValidationError;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pivot_row() {
        let e = transform_expense(&row(&["Assocation", "$1,250.00"]), 2023, ExpenseFormat::Pivot)
            .unwrap()
            .unwrap();
        assert_eq!(e.year(), 2023);
        assert_eq!(e.expense_type(), "association");
        assert_eq!(e.expense_type_raw(), "Assocation");
        assert_eq!(e.amount(), 1250.0);
    }

    #[test]
    fn test_pivot_trailing_space_label_kept_raw() {
        let e = transform_expense(&row(&["Outdoors ", "$80"]), 2024, ExpenseFormat::Pivot)
            .unwrap()
            .unwrap();
        assert_eq!(e.expense_type(), "outdoor");
        assert_eq!(e.expense_type_raw(), "Outdoors ");
    }

    #[test]
    fn test_pivot_unmapped_label_is_lowercased() {
        let e = transform_expense(&row(&[" Snow Removal ", "120"]), 2024, ExpenseFormat::Pivot)
            .unwrap()
            .unwrap();
        assert_eq!(e.expense_type(), "snow removal");
    }

    #[test]
    fn test_pivot_refund_is_negative() {
        let e = transform_expense(&row(&["Cleaning", "-$45.50"]), 2024, ExpenseFormat::Pivot)
            .unwrap()
            .unwrap();
        assert_eq!(e.amount(), -45.5);
    }

    #[test]
    fn test_pivot_skips() {
        for r in [
            row(&["Grand Total", "$9,000"]),
            row(&["total", "$9,000"]),
            row(&["Type", "Amount"]),
            row(&["", "$10"]),
            row(&["Taxes"]),
            row(&[]),
        ] {
            assert_eq!(transform_expense(&r, 2024, ExpenseFormat::Pivot).unwrap(), None, "{r:?}");
        }
    }

    #[test]
    fn test_pivot_bad_amount_degrades_to_zero() {
        let e = transform_expense(&row(&["Taxes", "n/a"]), 2024, ExpenseFormat::Pivot)
            .unwrap()
            .unwrap();
        assert_eq!(e.amount(), 0.0);
    }

    #[test]
    fn test_pivot_year_out_of_range_fails() {
        let err =
            transform_expense(&row(&["Taxes", "10"]), 2031, ExpenseFormat::Pivot).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::YearOutOfRange(2031))
        );
    }

    #[test]
    fn test_multi_year_row() {
        let r = row(&["2022", "3/4/2022", "Heat (oil)", "Fill up", "$612.40"]);
        let e = transform_expense(&r, 2022, ExpenseFormat::MultiYear).unwrap().unwrap();
        assert_eq!(e.year(), 2022);
        assert_eq!(e.expense_type(), "heating");
        assert_eq!(e.expense_type_raw(), "Heat (oil)");
        assert_eq!(e.amount(), 612.4);
    }

    #[test]
    fn test_multi_year_other_year_skipped() {
        let r = row(&["2021", "3/4/2021", "Taxes", "Q1", "$100"]);
        assert_eq!(transform_expense(&r, 2022, ExpenseFormat::MultiYear).unwrap(), None);
    }

    #[test]
    fn test_multi_year_header_and_short_rows_skipped() {
        let header = row(&["Year", "Date", "Category", "Description", "Amount"]);
        assert_eq!(transform_expense(&header, 2022, ExpenseFormat::MultiYear).unwrap(), None);
        let short = row(&["2022", "3/4/2022", "Taxes", "Q1"]);
        assert_eq!(transform_expense(&short, 2022, ExpenseFormat::MultiYear).unwrap(), None);
    }

    #[test]
    fn test_multi_year_blank_category_uses_description() {
        let r = row(&["2022", "5/1/2022", " ", "New gutter on the shed", "$300"]);
        let e = transform_expense(&r, 2022, ExpenseFormat::MultiYear).unwrap().unwrap();
        assert_eq!(e.expense_type(), "repairs");
        assert_eq!(e.expense_type_raw(), "New gutter on the shed");
    }

    #[test]
    fn test_dated_description_row() {
        let r = row(&["Home", "Furniture", "Futon for loft", "$429.99", "March 2024"]);
        let e = transform_expense(&r, 2025, ExpenseFormat::DatedDescription)
            .unwrap()
            .unwrap();
        assert_eq!(e.year(), 2024);
        assert_eq!(e.expense_type(), "furniture");
        assert_eq!(e.amount(), 429.99);
    }

    #[test]
    fn test_dated_description_without_year_uses_fallback() {
        let r = row(&["Home", "Linens", "Towels", "$60", "April"]);
        let e = transform_expense(&r, 2023, ExpenseFormat::DatedDescription)
            .unwrap()
            .unwrap();
        assert_eq!(e.year(), FALLBACK_EXPENSE_YEAR);
        assert_eq!(e.expense_type(), "linens");
    }

    #[test]
    fn test_dated_description_skips() {
        for r in [
            row(&["Category", "Type", "Description", "Amount", "Month"]),
            row(&["Home", "", "Towels", "$60", "April 2024"]),
            row(&["Home", "Linens", "Towels", "$60"]),
        ] {
            assert_eq!(
                transform_expense(&r, 2024, ExpenseFormat::DatedDescription).unwrap(),
                None,
                "{r:?}"
            );
        }
    }

    #[test]
    fn test_transform_expenses_skips_header_row() {
        let grid = vec![
            row(&["Cleaning", "$100"]),
            row(&["Cleaning", "$350"]),
            row(&["Taxes", "$1,000"]),
            row(&["Grand Total", "$1,350"]),
        ];
        let rows = transform_expenses(&grid, 2024, ExpenseFormat::Pivot, ValidationPolicy::Abort)
            .unwrap();
        assert_eq!(rows.records.len(), 2);
        assert_eq!(rows.records[0].amount(), 350.0);
        assert_eq!(rows.records[1].expense_type(), "taxes");
    }

    #[test]
    fn test_transform_expenses_collects_failures() {
        let grid = vec![
            row(&["Category", "Type", "Description", "Amount", "Month"]),
            row(&["Home", "Taxes", "Q1", "$100", "Jan 2016"]),
            row(&["Home", "Taxes", "Q2", "$100", "Apr 2024"]),
        ];
        let rows = transform_expenses(
            &grid,
            2024,
            ExpenseFormat::DatedDescription,
            ValidationPolicy::Collect,
        )
        .unwrap();
        assert_eq!(rows.records.len(), 1);
        assert_eq!(rows.failures.len(), 1);
        assert_eq!(rows.failures[0].row_index, 1);
        assert_eq!(rows.failures[0].error, ValidationError::YearOutOfRange(2016));
    }
}

//! Tolerant parsers for raw cell text.
//!
//! None of these functions fail. Malformed input degrades to a neutral value (`0.0`, `0` or
//! `None`) and the row transformers decide what that means for the row.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// Currency symbols that are dropped wherever they appear in an amount.
const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£'];

/// Parses a currency cell such as `"$1,234.56"`, `"1200 €"`, `"-$500"` or `"- $500"` into a
/// number.
///
/// A minus sign in front of or right after a leading currency symbol negates the value once.
/// Empty, whitespace-only, non-numeric and non-finite input yields `0.0`.
pub fn parse_currency(text: &str) -> f64 {
    let mut rest = text.trim();
    let mut negative = false;

    if let Some(after) = rest.strip_prefix('-') {
        negative = true;
        rest = after.trim_start();
    }
    if let Some(after) = rest.strip_prefix(CURRENCY_SYMBOLS) {
        rest = after.trim_start();
    }
    if let Some(after) = rest.strip_prefix('-') {
        negative = true;
        rest = after;
    }

    let cleaned: String = rest
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace() && !CURRENCY_SYMBOLS.contains(c))
        .collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return 0.0;
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            if negative {
                -value
            } else {
                value
            }
        }
        _ => 0.0,
    }
}

/// Parses a date cell in `D-Mon-YY(YY)` or `D/Mon/YY(YY)` form, e.g. `"1-Jan-25"` or
/// `"9/Jun/2017"`. Two-digit years below 50 are 20xx, the rest are 19xx.
///
/// Returns `None` for anything else, including unknown month abbreviations and dates that do not
/// exist on the calendar.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let cleaned = text.trim();
    if cleaned.is_empty() {
        return None;
    }
    let caps = dash_date_regex()
        .captures(cleaned)
        .or_else(|| slash_date_regex().captures(cleaned))?;

    let day: u32 = caps[1].parse().ok()?;
    let month = month_number(&caps[2])?;
    let mut year: i32 = caps[3].parse().ok()?;
    if year < 100 {
        year += if year < 50 { 2000 } else { 1900 };
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses an integer cell. Empty or non-numeric text yields `0`.
pub fn parse_count(text: &str) -> i64 {
    text.trim().parse().unwrap_or(0)
}

/// Finds the first 19xx or 20xx year in free text such as `"March 2023"` or `"FY2023"`.
pub fn find_year(text: &str) -> Option<i32> {
    year_regex()
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

fn month_number(abbreviation: &str) -> Option<u32> {
    let month = match abbreviation.to_ascii_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn dash_date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2})-([A-Za-z]{3})-(\d{2,4})").expect("invalid date regex")
    })
}

fn slash_date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2})/([A-Za-z]{3})/(\d{2,4})").expect("invalid date regex")
    })
}

fn year_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:19|20)\d{2}").expect("invalid year regex"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_currency_with_symbol_and_commas() {
        assert_eq!(parse_currency("$1,234.56"), 1234.56);
        assert_eq!(parse_currency("$1,800"), 1800.0);
        assert_eq!(parse_currency("$1,234,567.89"), 1234567.89);
        assert_eq!(parse_currency("  $50.00  "), 50.0);
        assert_eq!(parse_currency("300"), 300.0);
    }

    #[test]
    fn test_parse_currency_negative() {
        assert_eq!(parse_currency("-$500"), -500.0);
        assert_eq!(parse_currency("- $500"), -500.0);
        assert_eq!(parse_currency("$-500"), -500.0);
        assert_eq!(parse_currency("-500.25"), -500.25);
    }

    #[test]
    fn test_parse_currency_negative_applied_once() {
        assert_eq!(parse_currency("-$-500"), -500.0);
    }

    #[test]
    fn test_parse_currency_degrades_to_zero() {
        assert_eq!(parse_currency(""), 0.0);
        assert_eq!(parse_currency("   "), 0.0);
        assert_eq!(parse_currency("N/A"), 0.0);
        assert_eq!(parse_currency("$"), 0.0);
        assert_eq!(parse_currency("-"), 0.0);
        assert_eq!(parse_currency("inf"), 0.0);
        assert_eq!(parse_currency("NaN"), 0.0);
        assert_eq!(parse_currency("12abc"), 0.0);
    }

    #[test]
    fn test_parse_currency_other_symbols() {
        assert_eq!(parse_currency("€1.000"), 1.0);
        assert_eq!(parse_currency("£2,500"), 2500.0);
    }

    #[test]
    fn test_parse_currency_symbol_anywhere() {
        assert_eq!(parse_currency("1,200$"), 1200.0);
        assert_eq!(parse_currency("1200 €"), 1200.0);
        assert_eq!(parse_currency("$1,200 "), 1200.0);
        assert_eq!(parse_currency("£ 75.50 £"), 75.5);
        assert_eq!(parse_currency("-1,200$"), -1200.0);
    }

    #[test]
    fn test_parse_date_dash_format() {
        assert_eq!(parse_date("1-Jan-25"), Some(date(2025, 1, 1)));
        assert_eq!(parse_date("28-Dec-2024"), Some(date(2024, 12, 28)));
        assert_eq!(parse_date(" 4-Jun-24 "), Some(date(2024, 6, 4)));
    }

    #[test]
    fn test_parse_date_slash_format() {
        assert_eq!(parse_date("9/Jun/17"), Some(date(2017, 6, 9)));
        assert_eq!(parse_date("12/Jun/2017"), Some(date(2017, 6, 12)));
    }

    #[test]
    fn test_parse_date_two_digit_year_pivot() {
        assert_eq!(parse_date("1-Jan-49"), Some(date(2049, 1, 1)));
        assert_eq!(parse_date("1-Jan-50"), Some(date(1950, 1, 1)));
        assert_eq!(parse_date("1-Jan-99"), Some(date(1999, 1, 1)));
    }

    #[test]
    fn test_parse_date_all_months_any_case() {
        let months = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        for (ix, month) in months.iter().enumerate() {
            let expected = Some(date(2024, ix as u32 + 1, 1));
            assert_eq!(parse_date(&format!("1-{month}-24")), expected);
            assert_eq!(parse_date(&format!("1-{}-24", month.to_lowercase())), expected);
            assert_eq!(parse_date(&format!("1/{}/24", month.to_uppercase())), expected);
        }
    }

    #[test]
    fn test_parse_date_rejects() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("2024-01-15"), None);
        assert_eq!(parse_date("1-Xyz-24"), None);
        assert_eq!(parse_date("30-Feb-24"), None);
        assert_eq!(parse_date("1-Jan/24"), None);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("4"), 4);
        assert_eq!(parse_count(" 6 "), 6);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("four"), 0);
        assert_eq!(parse_count("4.5"), 0);
        assert_eq!(parse_count("-1"), -1);
    }

    #[test]
    fn test_find_year() {
        assert_eq!(find_year("March 2023"), Some(2023));
        assert_eq!(find_year("2022-11"), Some(2022));
        assert_eq!(find_year("Mar"), None);
        assert_eq!(find_year("FY2023"), Some(2023));
        assert_eq!(find_year("March2023"), Some(2023));
        assert_eq!(find_year("Q3 budget"), None);
    }
}

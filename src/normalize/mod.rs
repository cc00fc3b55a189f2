//! Static tables that map raw spreadsheet vocabulary to canonical values.
mod expense;
mod platform;

pub use expense::{categorize_by_keywords, normalize_expense_type, EXPENSE_CATEGORIES, OTHER};
pub use platform::normalize_platform;

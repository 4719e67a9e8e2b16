//! Display formatting for terminal output
//!
//! Renders fetched records as tables for the CLI.

pub mod budget;
pub mod category;
pub mod expense;

pub use budget::format_budget_list;
pub use category::{format_category_details, format_category_list};
pub use expense::format_expense_list;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

/// Date format used when a configured one cannot be rendered
pub const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Check that `format` is a strftime pattern chrono can render for a date
pub fn is_valid_date_format(format: &str) -> bool {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return false;
    }

    // Time-only specifiers like %H parse fine but cannot render a bare date
    let mut rendered = String::new();
    std::fmt::write(
        &mut rendered,
        format_args!(
            "{}",
            NaiveDate::MIN.format_with_items(items.into_iter())
        ),
    )
    .is_ok()
}

/// Render a date with a user-supplied format, falling back to ISO dates
pub fn format_date(date: NaiveDate, format: &str) -> String {
    let format = if is_valid_date_format(format) {
        format
    } else {
        FALLBACK_DATE_FORMAT
    };
    date.format(format).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_format_validation() {
        assert!(is_valid_date_format("%Y-%m-%d"));
        assert!(is_valid_date_format("%d %B %Y"));
        assert!(!is_valid_date_format("%Q"));
        assert!(!is_valid_date_format("%Y-%"));
        assert!(!is_valid_date_format("%H:%M"));
    }

    #[test]
    fn test_format_date_falls_back() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(format_date(date, "%d/%m/%Y"), "09/03/2024");
        assert_eq!(format_date(date, "%Q"), "2024-03-09");
    }
}

//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the resource clients.

pub mod auth;
pub mod budget;
pub mod category;
pub mod expense;
pub mod report;

pub use auth::{handle_auth_command, AuthCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use report::{handle_report_command, ReportCommands};

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{ClientError, ClientResult};
use crate::models::{Category, CategoryId, Money};
use crate::services::CategoryClient;
use crate::transport::ApiResponse;

/// Find a category by ID or name (case-insensitive) in the current list
pub async fn find_category(client: &CategoryClient, identifier: &str) -> ClientResult<Category> {
    let categories = client.fetch_all().await?;
    lookup_category(&categories, identifier)
        .cloned()
        .ok_or_else(|| ClientError::category_not_found(identifier))
}

pub(crate) fn lookup_category<'a>(
    categories: &'a [Category],
    identifier: &str,
) -> Option<&'a Category> {
    if let Ok(id) = identifier.parse::<CategoryId>() {
        if let Some(category) = categories.iter().find(|c| c.id == id) {
            return Some(category);
        }
    }
    let wanted = identifier.trim();
    categories
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(wanted))
}

pub(crate) fn parse_amount(raw: &str) -> ClientResult<Money> {
    let amount = Money::parse(raw)
        .map_err(|e| ClientError::Validation(format!("Invalid amount: {}", e)))?;
    if !amount.is_positive() {
        return Err(ClientError::Validation(
            "Amount must be greater than zero".into(),
        ));
    }
    Ok(amount)
}

pub(crate) fn parse_date(raw: Option<&str>) -> ClientResult<NaiveDate> {
    match raw {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
            ClientError::Validation(format!("Invalid date '{}' (expected YYYY-MM-DD)", raw))
        }),
        None => Ok(Local::now().date_naive()),
    }
}

/// `(month, year)`, defaulting to the current month
pub(crate) fn month_and_year(month: Option<u32>, year: Option<i32>) -> (u32, i32) {
    let today = Local::now().date_naive();
    (month.unwrap_or(today.month()), year.unwrap_or(today.year()))
}

/// The server's `message`, when the response body carries one
pub(crate) fn server_message(response: &ApiResponse) -> Option<String> {
    response
        .json_value()
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn categories() -> Vec<Category> {
        serde_json::from_value(json!([
            {"id": 1, "name": "Food"},
            {"id": 2, "name": "Rent"},
            {"id": 3, "name": "2024"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_lookup_by_id_or_name() {
        let categories = categories();
        assert_eq!(lookup_category(&categories, "2").unwrap().name, "Rent");
        assert_eq!(lookup_category(&categories, "cat-1").unwrap().name, "Food");
        assert_eq!(lookup_category(&categories, "food").unwrap().id.get(), 1);
        assert_eq!(lookup_category(&categories, "2024").unwrap().id.get(), 3);
        assert!(lookup_category(&categories, "Travel").is_none());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.50").unwrap().cents(), 1250);
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("abc").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(Some("2024-02-29")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date(Some("29/02/2024")).is_err());
        assert!(parse_date(None).is_ok());
    }

    #[test]
    fn test_month_and_year_override() {
        assert_eq!(month_and_year(Some(3), Some(2020)), (3, 2020));
    }

    #[test]
    fn test_server_message() {
        let response = ApiResponse::new(200, HashMap::new(), br#"{"message":"Saved"}"#.to_vec());
        assert_eq!(server_message(&response).as_deref(), Some("Saved"));

        let response = ApiResponse::new(204, HashMap::new(), Vec::new());
        assert!(server_message(&response).is_none());
    }
}

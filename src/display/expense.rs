//! Expense display formatting

use std::collections::HashMap;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::format_date;
use crate::models::{Category, CategoryId, Expense, Money};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format expenses as a table with a total line
///
/// `categories` resolves names for expenses that arrive without an embedded
/// category.
pub fn format_expense_list(
    expenses: &[Expense],
    categories: &[Category],
    currency_symbol: &str,
    date_format: &str,
) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let names: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    let rows = expenses.iter().map(|expense| ExpenseRow {
        id: expense.id.get(),
        date: format_date(expense.date, date_format),
        category: expense
            .category_name()
            .or_else(|| names.get(&expense.category_id).copied())
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", expense.category_id)),
        description: expense.description.clone().unwrap_or_default(),
        amount: expense.amount.format_with_symbol(currency_symbol),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::last(), Alignment::right());

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    format!(
        "{}\n{} expense(s), total {}",
        table,
        expenses.len(),
        total.format_with_symbol(currency_symbol)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_list() {
        assert_eq!(format_expense_list(&[], &[], "$", "%Y-%m-%d"), "No expenses found.");
    }

    #[test]
    fn test_list_resolves_category_names() {
        let expenses: Vec<Expense> = serde_json::from_value(json!([
            {"id": 1, "amount": "4.25", "category_id": 1, "description": "Coffee", "date": "2024-06-01"},
            {"id": 2, "amount": "20.00", "category_id": 5, "date": "2024-06-02"}
        ]))
        .unwrap();
        let categories: Vec<Category> =
            serde_json::from_value(json!([{"id": 1, "name": "Food"}])).unwrap();

        let output = format_expense_list(&expenses, &categories, "$", "%d/%m/%Y");
        assert!(output.contains("Food"));
        assert!(output.contains("#5"));
        assert!(output.contains("01/06/2024"));
        assert!(output.contains("2 expense(s), total $24.25"));
    }

    #[test]
    fn test_invalid_date_format_uses_iso_dates() {
        let expenses: Vec<Expense> = serde_json::from_value(json!([
            {"id": 1, "amount": "4.25", "category_id": 1, "date": "2024-06-01"}
        ]))
        .unwrap();

        let output = format_expense_list(&expenses, &[], "$", "%Q");
        assert!(output.contains("2024-06-01"));
    }
}

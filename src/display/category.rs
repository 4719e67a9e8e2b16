//! Category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Category, Money};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Expenses")]
    expenses: usize,
    #[tabled(rename = "Budget")]
    budget: String,
}

/// Format categories as a table
pub fn format_category_list(categories: &[Category], currency_symbol: &str) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'spendwise category create <name>' to add one."
            .to_string();
    }

    let rows = categories.iter().map(|category| CategoryRow {
        id: category.id.get(),
        name: category.name.clone(),
        expenses: category.expenses.len(),
        budget: category
            .budget
            .as_ref()
            .map(|b| b.amount.format_with_symbol(currency_symbol))
            .unwrap_or_else(|| "-".to_string()),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Format category details
pub fn format_category_details(category: &Category, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:         {}\n", category.id));

    if let Some(created) = category.created_at {
        output.push_str(&format!("  Created:    {}\n", created.format("%Y-%m-%d %H:%M")));
    }
    if let Some(updated) = category.updated_at {
        output.push_str(&format!("  Updated:    {}\n", updated.format("%Y-%m-%d %H:%M")));
    }

    if let Some(budget) = &category.budget {
        output.push_str(&format!(
            "  Budget:     {} ({})\n",
            budget.amount.format_with_symbol(currency_symbol),
            budget.period_label()
        ));
    }

    let spent: Money = category.expenses.iter().map(|e| e.amount).sum();
    output.push_str(&format!(
        "  Expenses:   {} totalling {}\n",
        category.expenses.len(),
        spent.format_with_symbol(currency_symbol)
    ));

    let budgeted = category
        .budget
        .as_ref()
        .map(|b| b.amount)
        .unwrap_or_default();
    let remaining = budgeted - spent;
    output.push_str(&format!(
        "  Remaining:  {}{}\n",
        remaining.format_with_symbol(currency_symbol),
        if remaining.is_negative() { " (over budget)" } else { "" }
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn categories() -> Vec<Category> {
        serde_json::from_value(json!([
            {"id": 1, "name": "Food", "expenses": [
                {"id": 1, "amount": "10.00", "category_id": 1, "date": "2024-01-01"},
                {"id": 2, "amount": "2.50", "category_id": 1, "date": "2024-01-02"}
            ]},
            {"id": 2, "name": "Rent", "budget":
                {"id": 1, "amount": "900.00", "category_id": 2, "month": 1, "year": 2024}}
        ]))
        .unwrap()
    }

    #[test]
    fn test_empty_list() {
        assert!(format_category_list(&[], "$").starts_with("No categories found."));
    }

    #[test]
    fn test_list_table() {
        let output = format_category_list(&categories(), "$");
        assert!(output.contains("Category"));
        assert!(output.contains("Food"));
        assert!(output.contains("$900.00"));
    }

    #[test]
    fn test_details() {
        let output = format_category_details(&categories()[0], "$");
        assert!(output.contains("Category: Food"));
        assert!(output.contains("2 totalling $12.50"));

        let output = format_category_details(&categories()[1], "$");
        assert!(output.contains("Budget:     $900.00 (2024-01)"));
        assert!(output.contains("Remaining:  $900.00\n"));
    }

    #[test]
    fn test_details_flags_overspent_category() {
        let category: Category = serde_json::from_value(json!({
            "id": 3, "name": "Travel",
            "expenses": [
                {"id": 1, "amount": "120.00", "category_id": 3, "date": "2024-02-01"}
            ],
            "budget": {"id": 2, "amount": "100.00", "category_id": 3, "month": 2, "year": 2024}
        }))
        .unwrap();

        let output = format_category_details(&category, "$");
        assert!(output.contains("Remaining:  -$20.00 (over budget)"));

        let output = format_category_details(&categories()[0], "$");
        assert!(output.contains("Remaining:  -$12.50 (over budget)"));
    }
}

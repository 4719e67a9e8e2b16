//! Budget display formatting

use std::collections::HashMap;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Budget, Category, CategoryId};

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format budgets as a table, newest period first
pub fn format_budget_list(budgets: &[Budget], categories: &[Category], currency_symbol: &str) -> String {
    if budgets.is_empty() {
        return "No budgets found.".to_string();
    }

    let names: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    let mut sorted: Vec<&Budget> = budgets.iter().collect();
    sorted.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));

    let rows = sorted.into_iter().map(|budget| BudgetRow {
        id: budget.id.get(),
        period: budget.period_label(),
        category: budget
            .category
            .as_ref()
            .map(|c| c.name.as_str())
            .or_else(|| names.get(&budget.category_id).copied())
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", budget.category_id)),
        amount: budget.amount.format_with_symbol(currency_symbol),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

//! Budget Overview Report
//!
//! Compares each budget for a month against what was actually spent in its
//! category that month.

use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use crate::error::{ClientError, ClientResult};
use crate::models::{Budget, Category, CategoryId, Expense, Money};

use super::spending::{export_error, truncate, UNCATEGORIZED};

/// One budget line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetRow {
    pub category_id: CategoryId,
    pub category: String,
    pub budgeted: Money,
    pub spent: Money,
    /// `budgeted - spent`; negative when overspent
    pub remaining: Money,
}

impl BudgetRow {
    pub fn is_overspent(&self) -> bool {
        self.remaining.is_negative()
    }

    /// Share of the budget already spent, in percent
    pub fn percent_used(&self) -> f64 {
        if self.budgeted.is_zero() {
            if self.spent.is_zero() {
                0.0
            } else {
                100.0
            }
        } else {
            (self.spent.cents() as f64 / self.budgeted.cents() as f64) * 100.0
        }
    }
}

/// Budgeted vs. spent for every budget in one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetOverview {
    pub month: u32,
    pub year: i32,
    pub rows: Vec<BudgetRow>,
    pub total_budgeted: Money,
    pub total_spent: Money,
    pub total_remaining: Money,
}

impl BudgetOverview {
    /// Build the overview for `month`/`year`
    ///
    /// Budgets for other months are ignored. Spending counts every expense in
    /// the budget's category dated inside the month.
    pub fn generate(
        budgets: &[Budget],
        expenses: &[Expense],
        categories: &[Category],
        month: u32,
        year: i32,
    ) -> Self {
        let names: HashMap<CategoryId, &str> = categories
            .iter()
            .map(|c| (c.id, c.name.as_str()))
            .collect();

        let mut spent_by_category: HashMap<CategoryId, Money> = HashMap::new();
        for expense in expenses.iter().filter(|e| e.is_in_month(month, year)) {
            *spent_by_category
                .entry(expense.category_id)
                .or_insert_with(Money::zero) += expense.amount;
        }

        let mut rows: Vec<BudgetRow> = budgets
            .iter()
            .filter(|b| b.is_for(month, year))
            .map(|budget| {
                let category = budget
                    .category
                    .as_ref()
                    .map(|c| c.name.as_str())
                    .or_else(|| names.get(&budget.category_id).copied())
                    .unwrap_or(UNCATEGORIZED)
                    .to_string();
                let spent = spent_by_category
                    .get(&budget.category_id)
                    .copied()
                    .unwrap_or_default();
                BudgetRow {
                    category_id: budget.category_id,
                    category,
                    budgeted: budget.amount,
                    spent,
                    remaining: budget.amount - spent,
                }
            })
            .collect();
        rows.sort_by(|a, b| a.category.cmp(&b.category));

        let total_budgeted: Money = rows.iter().map(|r| r.budgeted).sum();
        let total_spent: Money = rows.iter().map(|r| r.spent).sum();

        Self {
            month,
            year,
            rows,
            total_budgeted,
            total_spent,
            total_remaining: total_budgeted - total_spent,
        }
    }

    pub fn overspent(&self) -> impl Iterator<Item = &BudgetRow> {
        self.rows.iter().filter(|r| r.is_overspent())
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Budget Overview: {:04}-{:02}\n",
            self.year, self.month
        ));
        output.push_str(&"=".repeat(72));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No budgets set for this month.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<24} {:>14} {:>14} {:>14}\n",
            "Category", "Budgeted", "Spent", "Remaining"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for row in &self.rows {
            let marker = if row.is_overspent() { " !" } else { "" };
            output.push_str(&format!(
                "{:<24} {:>14} {:>14} {:>14}{}\n",
                truncate(&row.category, 24),
                row.budgeted.format_with_symbol(currency_symbol),
                row.spent.format_with_symbol(currency_symbol),
                row.remaining.format_with_symbol(currency_symbol),
                marker
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>14} {:>14} {:>14}\n",
            "TOTAL",
            self.total_budgeted.format_with_symbol(currency_symbol),
            self.total_spent.format_with_symbol(currency_symbol),
            self.total_remaining.format_with_symbol(currency_symbol)
        ));

        let overspent = self.overspent().count();
        if overspent > 0 {
            output.push_str(&format!("\n! {} budget(s) overspent\n", overspent));
        }

        output
    }

    /// Export the rows to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> ClientResult<()> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record([
            "Month",
            "Category",
            "Budgeted",
            "Spent",
            "Remaining",
            "Overspent",
        ])
        .map_err(export_error)?;

        let period = format!("{:04}-{:02}", self.year, self.month);
        for row in &self.rows {
            out.write_record([
                period.clone(),
                row.category.clone(),
                row.budgeted.to_decimal_string(),
                row.spent.to_decimal_string(),
                row.remaining.to_decimal_string(),
                row.is_overspent().to_string(),
            ])
            .map_err(export_error)?;
        }

        out.flush()
            .map_err(|e| ClientError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn budget(id: u64, cents: i64, category_id: u64, month: u32, year: i32) -> Budget {
        serde_json::from_value(json!({
            "id": id,
            "amount": Money::from_cents(cents).to_decimal_string(),
            "category_id": category_id,
            "month": month,
            "year": year,
        }))
        .unwrap()
    }

    fn expense(id: u64, cents: i64, category_id: u64, date: &str) -> Expense {
        serde_json::from_value(json!({
            "id": id,
            "amount": Money::from_cents(cents).to_decimal_string(),
            "category_id": category_id,
            "date": date,
        }))
        .unwrap()
    }

    fn categories() -> Vec<Category> {
        serde_json::from_value(json!([
            {"id": 1, "name": "Food"},
            {"id": 2, "name": "Fun"}
        ]))
        .unwrap()
    }

    fn sample() -> BudgetOverview {
        let budgets = vec![
            budget(1, 30_000, 1, 3, 2024),
            budget(2, 5_000, 2, 3, 2024),
            budget(3, 99_900, 1, 4, 2024),
        ];
        let expenses = vec![
            expense(1, 12_000, 1, "2024-03-02"),
            expense(2, 4_550, 1, "2024-03-30"),
            expense(3, 7_500, 2, "2024-03-15"),
            expense(4, 50_000, 1, "2024-04-01"),
            expense(5, 1_000, 2, "2023-03-15"),
        ];
        BudgetOverview::generate(&budgets, &expenses, &categories(), 3, 2024)
    }

    #[test]
    fn test_only_budgets_for_the_month() {
        let overview = sample();
        assert_eq!(overview.rows.len(), 2);
        assert_eq!(overview.total_budgeted.cents(), 35_000);
    }

    #[test]
    fn test_spent_and_remaining() {
        let overview = sample();

        let food = &overview.rows[0];
        assert_eq!(food.category, "Food");
        assert_eq!(food.spent.cents(), 16_550);
        assert_eq!(food.remaining.cents(), 13_450);
        assert!(!food.is_overspent());

        let fun = &overview.rows[1];
        assert_eq!(fun.spent.cents(), 7_500);
        assert_eq!(fun.remaining.cents(), -2_500);
        assert!(fun.is_overspent());
        assert_eq!(fun.percent_used(), 150.0);

        assert_eq!(overview.total_spent.cents(), 24_050);
        assert_eq!(overview.total_remaining.cents(), 10_950);
        assert_eq!(overview.overspent().count(), 1);
    }

    #[test]
    fn test_budget_without_spending() {
        let overview = BudgetOverview::generate(
            &[budget(1, 10_000, 1, 1, 2025)],
            &[],
            &categories(),
            1,
            2025,
        );
        assert!(overview.rows[0].spent.is_zero());
        assert_eq!(overview.rows[0].remaining.cents(), 10_000);
        assert_eq!(overview.rows[0].percent_used(), 0.0);
    }

    #[test]
    fn test_format_terminal_flags_overspending() {
        let output = sample().format_terminal("$");
        assert!(output.contains("Budget Overview: 2024-03"));
        assert!(output.contains("-$25.00 !"));
        assert!(output.contains("1 budget(s) overspent"));

        let empty = BudgetOverview::generate(&[], &[], &[], 1, 2025).format_terminal("$");
        assert!(empty.contains("No budgets set for this month."));
    }

    #[test]
    fn test_export_csv() {
        let mut buffer = Vec::new();
        sample().export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        assert!(csv.starts_with("Month,Category,Budgeted,Spent,Remaining,Overspent\n"));
        assert!(csv.contains("2024-03,Fun,50.00,75.00,-25.00,true"));
    }
}

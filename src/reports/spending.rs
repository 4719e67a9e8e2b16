//! Spending Report
//!
//! Aggregates expenses by category and year: the data behind the dashboard's
//! per-category totals and the yearly spending trend.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use serde::Serialize;

use crate::error::{ClientError, ClientResult};
use crate::models::{Category, CategoryId, Expense, Money};

/// Name used for expenses whose category cannot be resolved
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Total spent in one category in one year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpendingRow {
    pub category: String,
    pub year: i32,
    pub total: Money,
    pub count: usize,
}

/// Total spent in one category across all years
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
    pub count: usize,
}

/// Total spent in one year across all categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearTotal {
    pub year: i32,
    pub total: Money,
    pub count: usize,
}

/// Spending grouped by (category, year)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpendingReport {
    /// Rows sorted by year, then category name
    pub rows: Vec<SpendingRow>,
    pub total: Money,
    pub expense_count: usize,
}

impl SpendingReport {
    /// Group `expenses` by category name and year
    ///
    /// The category name comes from the expense's embedded category, else
    /// from `categories` by id, else [`UNCATEGORIZED`].
    pub fn from_expenses(expenses: &[Expense], categories: &[Category]) -> Self {
        let names: HashMap<CategoryId, &str> = categories
            .iter()
            .map(|c| (c.id, c.name.as_str()))
            .collect();

        // (year, category) keys give the row order for free
        let mut grouped: BTreeMap<(i32, String), (Money, usize)> = BTreeMap::new();
        let mut total = Money::zero();

        for expense in expenses {
            let name = expense
                .category_name()
                .or_else(|| names.get(&expense.category_id).copied())
                .unwrap_or(UNCATEGORIZED);

            let entry = grouped
                .entry((expense.year(), name.to_string()))
                .or_insert((Money::zero(), 0));
            entry.0 += expense.amount;
            entry.1 += 1;
            total += expense.amount;
        }

        let rows = grouped
            .into_iter()
            .map(|((year, category), (total, count))| SpendingRow {
                category,
                year,
                total,
                count,
            })
            .collect();

        Self {
            rows,
            total,
            expense_count: expenses.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Totals per category, largest first
    pub fn by_category(&self) -> Vec<CategoryTotal> {
        let mut totals: BTreeMap<&str, (Money, usize)> = BTreeMap::new();
        for row in &self.rows {
            let entry = totals
                .entry(row.category.as_str())
                .or_insert((Money::zero(), 0));
            entry.0 += row.total;
            entry.1 += row.count;
        }

        let mut totals: Vec<CategoryTotal> = totals
            .into_iter()
            .map(|(category, (total, count))| CategoryTotal {
                category: category.to_string(),
                total,
                count,
            })
            .collect();
        // Stable sort keeps ties in name order
        totals.sort_by(|a, b| b.total.cmp(&a.total));
        totals
    }

    /// Totals per year, oldest first
    pub fn by_year(&self) -> Vec<YearTotal> {
        let mut totals: BTreeMap<i32, (Money, usize)> = BTreeMap::new();
        for row in &self.rows {
            let entry = totals.entry(row.year).or_insert((Money::zero(), 0));
            entry.0 += row.total;
            entry.1 += row.count;
        }

        totals
            .into_iter()
            .map(|(year, (total, count))| YearTotal { year, total, count })
            .collect()
    }

    /// Share of the grand total, in percent
    pub fn percentage_of_total(&self, amount: Money) -> f64 {
        if self.total.is_zero() {
            0.0
        } else {
            (amount.cents() as f64 / self.total.cents() as f64) * 100.0
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Spending Report\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.is_empty() {
            output.push_str("No expenses recorded.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<6} {:<28} {:>14} {:>8}\n",
            "Year", "Category", "Amount", "Count"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        let mut current_year = None;
        for row in &self.rows {
            let year = if current_year == Some(row.year) {
                String::new()
            } else {
                current_year = Some(row.year);
                row.year.to_string()
            };
            output.push_str(&format!(
                "{:<6} {:<28} {:>14} {:>8}\n",
                year,
                truncate(&row.category, 28),
                row.total.format_with_symbol(currency_symbol),
                row.count
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str("By year:\n");
        for year in self.by_year() {
            output.push_str(&format!(
                "  {:<33} {:>14} {:>8}\n",
                year.year,
                year.total.format_with_symbol(currency_symbol),
                year.count
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<35} {:>14} {:>8}\n",
            "TOTAL",
            self.total.format_with_symbol(currency_symbol),
            self.expense_count
        ));

        output
    }

    /// Export the rows to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> ClientResult<()> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(["Year", "Category", "Amount", "Count"])
            .map_err(export_error)?;

        for row in &self.rows {
            out.write_record([
                row.year.to_string(),
                row.category.clone(),
                row.total.to_decimal_string(),
                row.count.to_string(),
            ])
            .map_err(export_error)?;
        }

        out.write_record([
            String::new(),
            "TOTAL".to_string(),
            self.total.to_decimal_string(),
            self.expense_count.to_string(),
        ])
        .map_err(export_error)?;

        out.flush()
            .map_err(|e| ClientError::Export(e.to_string()))?;
        Ok(())
    }

    /// Export the full report as pretty JSON
    pub fn export_json<W: Write>(&self, writer: W) -> ClientResult<()> {
        serde_json::to_writer_pretty(writer, &self.export_document())
            .map_err(|e| ClientError::Export(e.to_string()))
    }

    /// Export the full report as YAML
    pub fn export_yaml<W: Write>(&self, writer: W) -> ClientResult<()> {
        serde_yaml::to_writer(writer, &self.export_document())
            .map_err(|e| ClientError::Export(e.to_string()))
    }

    fn export_document(&self) -> SpendingExport<'_> {
        SpendingExport {
            rows: &self.rows,
            by_category: self.by_category(),
            by_year: self.by_year(),
            total: self.total,
            expense_count: self.expense_count,
        }
    }
}

#[derive(Serialize)]
struct SpendingExport<'a> {
    rows: &'a [SpendingRow],
    by_category: Vec<CategoryTotal>,
    by_year: Vec<YearTotal>,
    total: Money,
    expense_count: usize,
}

pub(crate) fn export_error(err: csv::Error) -> ClientError {
    ClientError::Export(err.to_string())
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn expense(id: u64, cents: i64, category_id: u64, date: &str, embedded: Option<&str>) -> Expense {
        let mut value = json!({
            "id": id,
            "amount": Money::from_cents(cents).to_decimal_string(),
            "category_id": category_id,
            "date": date,
        });
        if let Some(name) = embedded {
            value["category"] = json!({"id": category_id, "name": name});
        }
        serde_json::from_value(value).unwrap()
    }

    fn category(id: u64, name: &str) -> Category {
        serde_json::from_value(json!({"id": id, "name": name})).unwrap()
    }

    fn sample() -> SpendingReport {
        let categories = vec![category(1, "Food"), category(2, "Rent")];
        let expenses = vec![
            expense(1, 1050, 1, "2024-01-05", None),
            expense(2, 1025, 1, "2024-03-09", Some("Food")),
            expense(3, 120_000, 2, "2024-01-01", None),
            expense(4, 999, 1, "2023-12-31", None),
            expense(5, 500, 9, "2024-02-02", None),
        ];
        SpendingReport::from_expenses(&expenses, &categories)
    }

    #[test]
    fn test_groups_by_category_and_year() {
        let report = sample();

        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.rows[0].year, 2023);
        assert_eq!(report.rows[0].category, "Food");
        assert_eq!(report.rows[0].total.cents(), 999);

        let food_2024 = report
            .rows
            .iter()
            .find(|r| r.year == 2024 && r.category == "Food")
            .unwrap();
        assert_eq!(food_2024.total.cents(), 2075);
        assert_eq!(food_2024.count, 2);
    }

    #[test]
    fn test_unknown_category_is_uncategorized() {
        let report = sample();
        assert!(report
            .rows
            .iter()
            .any(|r| r.category == UNCATEGORIZED && r.total.cents() == 500));
    }

    #[test]
    fn test_totals_are_exact() {
        let report = sample();
        assert_eq!(report.total.cents(), 1050 + 1025 + 120_000 + 999 + 500);
        assert_eq!(report.expense_count, 5);

        let by_year = report.by_year();
        assert_eq!(by_year.len(), 2);
        assert_eq!(by_year[0].year, 2023);
        assert_eq!(by_year[1].total.cents(), 1050 + 1025 + 120_000 + 500);

        let by_category = report.by_category();
        assert_eq!(by_category[0].category, "Rent");
        assert_eq!(by_category[1].total.cents(), 1050 + 1025 + 999);
    }

    #[test]
    fn test_empty_report() {
        let report = SpendingReport::from_expenses(&[], &[]);
        assert!(report.is_empty());
        assert!(report.total.is_zero());
        assert_eq!(report.percentage_of_total(Money::from_cents(10)), 0.0);
        assert!(report.format_terminal("$").contains("No expenses recorded."));
    }

    #[test]
    fn test_format_terminal() {
        let output = sample().format_terminal("$");
        assert!(output.contains("Spending Report"));
        assert!(output.contains("Rent"));
        assert!(output.contains("$1200.00"));
        assert!(output.contains("TOTAL"));
    }

    #[test]
    fn test_export_csv() {
        let mut buffer = Vec::new();
        sample().export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Year,Category,Amount,Count"));
        assert_eq!(lines.next(), Some("2023,Food,9.99,1"));
        assert!(csv.contains(",TOTAL,1235.74,5"));
    }

    #[test]
    fn test_export_json_and_yaml() {
        let mut json_out = Vec::new();
        sample().export_json(&mut json_out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json_out).unwrap();
        assert_eq!(value["total"], json!("1235.74"));
        assert_eq!(value["by_year"][0]["year"], json!(2023));

        let mut yaml_out = Vec::new();
        sample().export_yaml(&mut yaml_out).unwrap();
        let yaml = String::from_utf8(yaml_out).unwrap();
        assert!(yaml.contains("expense_count: 5"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Food", 10), "Food");
        assert_eq!(truncate("Entertainment and leisure", 10), "Enterta...");
    }
}

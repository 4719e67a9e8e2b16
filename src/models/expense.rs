//! Expense models

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::category::CategorySummary;
use super::ids::{CategoryId, ExpenseId};
use super::money::Money;
use super::wire;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    pub amount: Money,

    pub category_id: CategoryId,

    #[serde(default)]
    pub description: Option<String>,

    /// Calendar date of the expense; timestamps are truncated to the date
    #[serde(deserialize_with = "wire::calendar_date")]
    pub date: NaiveDate,

    #[serde(default, deserialize_with = "wire::opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,

    /// The owning category, when embedded
    #[serde(default)]
    pub category: Option<CategorySummary>,
}

impl Expense {
    /// Year the expense falls in, used for yearly grouping
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Check if the expense falls in the given calendar month
    pub fn is_in_month(&self, month: u32, year: i32) -> bool {
        self.date.month() == month && self.date.year() == year
    }

    /// Embedded category name, if the backend sent one
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }
}

/// Payload for creating or updating an expense
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseDraft {
    pub amount: Money,
    pub category_id: CategoryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
}

impl ExpenseDraft {
    pub fn new(amount: Money, category_id: CategoryId, date: NaiveDate) -> Self {
        Self {
            amount,
            category_id,
            description: None,
            date,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

mod date_format {
    use chrono::NaiveDate;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }
}

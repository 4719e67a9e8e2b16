//! Budget models
//!
//! A budget caps spending for one category in one calendar month.

use serde::{Deserialize, Serialize};

use super::category::CategorySummary;
use super::ids::{BudgetId, CategoryId};
use super::money::Money;
use super::wire;

/// A monthly budget for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    /// Budgeted amount
    pub amount: Money,

    pub category_id: CategoryId,

    /// Month (1-12)
    #[serde(deserialize_with = "wire::int_or_string")]
    pub month: u32,

    #[serde(deserialize_with = "wire::int_or_string")]
    pub year: i32,

    /// The owning category, when embedded
    #[serde(default)]
    pub category: Option<CategorySummary>,
}

impl Budget {
    pub fn is_for(&self, month: u32, year: i32) -> bool {
        self.month == month && self.year == year
    }

    /// Period label, e.g. `2024-03`
    pub fn period_label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Payload for creating or updating a budget
///
/// Month and year are always sent, on create as well as on update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetDraft {
    pub amount: Money,
    pub category_id: CategoryId,
    pub month: u32,
    pub year: i32,
}

impl BudgetDraft {
    pub fn new(amount: Money, category_id: CategoryId, month: u32, year: i32) -> Self {
        Self {
            amount,
            category_id,
            month,
            year,
        }
    }
}

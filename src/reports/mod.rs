//! Reports module for Spendwise
//!
//! Reports are computed locally from the last fetched lists of expenses,
//! categories and budgets.

pub mod budget_overview;
pub mod spending;

pub use budget_overview::{BudgetOverview, BudgetRow};
pub use spending::{CategoryTotal, SpendingReport, SpendingRow, YearTotal, UNCATEGORIZED};

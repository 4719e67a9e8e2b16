//! Core data models for Spendwise
//!
//! Wire entities exchanged with the backend (categories, expenses, budgets),
//! the payloads sent to create or update them, and the auth payloads.

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod user;
pub(crate) mod wire;

pub use budget::{Budget, BudgetDraft};
pub use category::{Category, CategoryDraft, CategorySummary, CategoryValidationError};
pub use expense::{Expense, ExpenseDraft};
pub use ids::{BudgetId, CategoryId, ExpenseId};
pub use money::{Money, MoneyParseError};
pub use user::{AuthPayload, Credentials, NewUser, UserProfile};

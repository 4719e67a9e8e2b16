//! Resource clients for Spendwise
//!
//! Each client sits on the shared [`Transport`](crate::transport::Transport),
//! shapes request payloads for one backend resource and normalizes failures
//! into [`ApiError`](crate::error::ApiError).

pub mod auth;
pub mod budget;
pub mod category;
pub mod expense;
pub mod resource;

pub use auth::AuthClient;
pub use budget::{BudgetClient, BudgetForm, Budgets};
pub use category::{Categories, CategoryClient, CategoryForm};
pub use expense::{ExpenseClient, ExpenseForm, Expenses};
pub use resource::{Form, Operation, Resource, ResourceClient};

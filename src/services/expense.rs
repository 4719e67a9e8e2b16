//! Expense client
//!
//! Adds category filtering on top of the shared CRUD operations.

use tracing::debug;

use crate::error::ApiError;
use crate::models::{CategoryId, Expense, ExpenseDraft, ExpenseId};
use crate::transport::ApiResponse;

use super::resource::{decode_records, Form, Operation, Resource, ResourceClient};

/// The `/api/expenses` collection
#[derive(Debug)]
pub enum Expenses {}

impl Resource for Expenses {
    const PATH: &'static str = "/api/expenses";
    const SINGULAR: &'static str = "expense";
    const PLURAL: &'static str = "expenses";
    type Id = ExpenseId;
    type Record = Expense;
    type Draft = ExpenseDraft;
}

pub type ExpenseClient = ResourceClient<Expenses>;

pub type ExpenseForm = Form<ExpenseId, ExpenseDraft>;

impl ResourceClient<Expenses> {
    /// `GET /api/expenses`, filtered to one category when given
    ///
    /// `None` sends no `category_id` parameter at all.
    pub async fn list_by_category(
        &self,
        category: Option<CategoryId>,
    ) -> Result<ApiResponse, ApiError> {
        match category {
            Some(id) => {
                debug!(category_id = %id, "listing expenses for category");
                self.list_with(&[("category_id", id.to_string())]).await
            }
            None => self.list_with(&[]).await,
        }
    }

    /// [`list_by_category`](Self::list_by_category) decoded into expenses
    pub async fn fetch_by_category(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<Expense>, ApiError> {
        let response = self.list_by_category(category).await?;
        decode_records(&response, &Operation::List.error_prefix::<Expenses>())
    }
}

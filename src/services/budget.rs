//! Budget client

use crate::models::{Budget, BudgetDraft, BudgetId};

use super::resource::{Form, Resource, ResourceClient};

/// The `/api/budgets` collection
#[derive(Debug)]
pub enum Budgets {}

impl Resource for Budgets {
    const PATH: &'static str = "/api/budgets";
    const SINGULAR: &'static str = "budget";
    const PLURAL: &'static str = "budgets";
    type Id = BudgetId;
    type Record = Budget;
    type Draft = BudgetDraft;
}

pub type BudgetClient = ResourceClient<Budgets>;

/// Update payload; month and year are sent on update as on create
pub type BudgetForm = Form<BudgetId, BudgetDraft>;

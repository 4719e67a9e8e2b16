//! Category models
//!
//! Categories are the buckets expenses are filed under. The backend may embed
//! the category's expenses and its budget when listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::budget::Budget;
use super::expense::Expense;
use super::ids::CategoryId;
use super::wire;

/// A spending category as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Server-assigned identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// When the category was created
    #[serde(default, deserialize_with = "wire::opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the category was last modified
    #[serde(default, deserialize_with = "wire::opt_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Expenses filed under this category, when embedded
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub expenses: Vec<Expense>,

    /// The category's budget, when embedded
    #[serde(default)]
    pub budget: Option<Budget>,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The `{id, name}` stub embedded in expenses and budgets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub name: String,
}

/// Payload for creating or renaming a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDraft {
    pub name: String,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Validate the draft
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 255 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 255)", len)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

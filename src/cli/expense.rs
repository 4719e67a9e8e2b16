//! Expense CLI commands

use clap::Subcommand;

use crate::client::SpendwiseClient;
use crate::config::settings::Settings;
use crate::display::expense::format_expense_list;
use crate::display::format_date;
use crate::error::{ClientError, ClientResult};
use crate::models::{ExpenseDraft, ExpenseId};
use crate::services::ExpenseForm;

use super::{find_category, lookup_category, parse_amount, parse_date};

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// List expenses
    List {
        /// Only expenses in this category (name or ID)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Record a new expense
    Add {
        /// Amount (e.g., "12.50")
        amount: String,
        /// Category name or ID
        category: String,
        /// What the money was spent on
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Edit an expense
    Edit {
        /// Expense ID
        id: ExpenseId,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: ExpenseId,
    },
}

/// Handle an expense command
pub async fn handle_expense_command(
    client: &SpendwiseClient,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ClientResult<()> {
    let expenses = client.expenses();

    match cmd {
        ExpenseCommands::List { category } => {
            let categories = client.categories().fetch_all().await?;
            let filter = match category {
                Some(identifier) => Some(
                    lookup_category(&categories, &identifier)
                        .ok_or_else(|| ClientError::category_not_found(&identifier))?
                        .id,
                ),
                None => None,
            };

            let list = expenses.fetch_by_category(filter).await?;
            println!(
                "{}",
                format_expense_list(
                    &list,
                    &categories,
                    &settings.currency_symbol,
                    &settings.date_format
                )
            );
        }

        ExpenseCommands::Add {
            amount,
            category,
            description,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let date = parse_date(date.as_deref())?;
            let category = find_category(&client.categories(), &category).await?;

            let mut draft = ExpenseDraft::new(amount, category.id, date);
            if let Some(description) = description {
                draft = draft.with_description(description);
            }

            expenses.create(&draft).await?;
            println!(
                "Recorded {} in {} on {}",
                amount.format_with_symbol(&settings.currency_symbol),
                category.name,
                format_date(date, &settings.date_format)
            );
        }

        ExpenseCommands::Edit {
            id,
            amount,
            category,
            description,
            date,
        } => {
            // PUT replaces the whole record, so start from the current values
            let current = expenses
                .fetch_all()
                .await?
                .into_iter()
                .find(|e| e.id == id)
                .ok_or_else(|| ClientError::expense_not_found(id.to_string()))?;

            let category_id = match category {
                Some(identifier) => find_category(&client.categories(), &identifier).await?.id,
                None => current.category_id,
            };
            let fields = ExpenseDraft {
                amount: match amount {
                    Some(raw) => parse_amount(&raw)?,
                    None => current.amount,
                },
                category_id,
                description: description.or(current.description),
                date: match date {
                    Some(raw) => parse_date(Some(&raw))?,
                    None => current.date,
                },
            };

            expenses.update(&ExpenseForm::new(id, fields)).await?;
            println!("Updated expense {}", id);
        }

        ExpenseCommands::Delete { id } => {
            expenses.delete(id).await?;
            println!("Deleted expense {}", id);
        }
    }

    Ok(())
}

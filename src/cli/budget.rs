//! Budget CLI commands

use clap::Subcommand;

use crate::client::SpendwiseClient;
use crate::config::settings::Settings;
use crate::display::budget::format_budget_list;
use crate::error::{ClientError, ClientResult};
use crate::models::{BudgetDraft, BudgetId};
use crate::services::BudgetForm;

use super::{find_category, month_and_year, parse_amount};

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// List all budgets
    List,

    /// Set a monthly budget for a category
    Set {
        /// Category name or ID
        category: String,
        /// Amount (e.g., "500" or "500.00")
        amount: String,
        /// Month (1-12), defaults to the current month
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
        /// Year, defaults to the current year
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Edit a budget
    Edit {
        /// Budget ID
        id: BudgetId,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// New month (1-12)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
        /// New year
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Delete a budget
    Delete {
        /// Budget ID
        id: BudgetId,
    },
}

/// Handle a budget command
pub async fn handle_budget_command(
    client: &SpendwiseClient,
    settings: &Settings,
    cmd: BudgetCommands,
) -> ClientResult<()> {
    let budgets = client.budgets();

    match cmd {
        BudgetCommands::List => {
            let list = budgets.fetch_all().await?;
            let categories = client.categories().fetch_all().await?;
            println!(
                "{}",
                format_budget_list(&list, &categories, &settings.currency_symbol)
            );
        }

        BudgetCommands::Set {
            category,
            amount,
            month,
            year,
        } => {
            let amount = parse_amount(&amount)?;
            let category = find_category(&client.categories(), &category).await?;
            let (month, year) = month_and_year(month, year);

            budgets
                .create(&BudgetDraft::new(amount, category.id, month, year))
                .await?;
            println!(
                "Budgeted {} for {} in {:04}-{:02}",
                amount.format_with_symbol(&settings.currency_symbol),
                category.name,
                year,
                month
            );
        }

        BudgetCommands::Edit {
            id,
            amount,
            category,
            month,
            year,
        } => {
            let current = budgets
                .fetch_all()
                .await?
                .into_iter()
                .find(|b| b.id == id)
                .ok_or_else(|| ClientError::budget_not_found(id.to_string()))?;

            let category_id = match category {
                Some(identifier) => find_category(&client.categories(), &identifier).await?.id,
                None => current.category_id,
            };
            let fields = BudgetDraft::new(
                match amount {
                    Some(raw) => parse_amount(&raw)?,
                    None => current.amount,
                },
                category_id,
                month.unwrap_or(current.month),
                year.unwrap_or(current.year),
            );

            budgets.update(&BudgetForm::new(id, fields)).await?;
            println!("Updated budget {}", id);
        }

        BudgetCommands::Delete { id } => {
            budgets.delete(id).await?;
            println!("Deleted budget {}", id);
        }
    }

    Ok(())
}

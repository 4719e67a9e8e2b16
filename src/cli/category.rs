//! Category CLI commands

use clap::Subcommand;

use crate::client::SpendwiseClient;
use crate::config::settings::Settings;
use crate::display::category::{format_category_details, format_category_list};
use crate::error::{ClientError, ClientResult};
use crate::models::CategoryDraft;
use crate::services::CategoryForm;

use super::{find_category, server_message};

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Create a new category
    Create {
        /// Category name
        name: String,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Rename a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        name: String,
    },

    /// Delete a category
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub async fn handle_category_command(
    client: &SpendwiseClient,
    settings: &Settings,
    cmd: CategoryCommands,
) -> ClientResult<()> {
    let categories = client.categories();

    match cmd {
        CategoryCommands::List => {
            let list = categories.fetch_all().await?;
            println!("{}", format_category_list(&list, &settings.currency_symbol));
        }

        CategoryCommands::Create { name } => {
            let draft = CategoryDraft::new(name.trim());
            draft
                .validate()
                .map_err(|e| ClientError::Validation(e.to_string()))?;

            let response = categories.create(&draft).await?;
            println!("Created category: {}", draft.name);
            if let Some(message) = server_message(&response) {
                println!("  {}", message);
            }
        }

        CategoryCommands::Show { category } => {
            let found = find_category(&categories, &category).await?;
            print!(
                "{}",
                format_category_details(&found, &settings.currency_symbol)
            );
        }

        CategoryCommands::Edit { category, name } => {
            let found = find_category(&categories, &category).await?;
            let form = CategoryForm::rename(found.id, name.trim());
            form.fields
                .validate()
                .map_err(|e| ClientError::Validation(e.to_string()))?;

            categories.update(&form).await?;
            println!("Renamed category '{}' to '{}'", found.name, form.fields.name);
        }

        CategoryCommands::Delete { category } => {
            let found = find_category(&categories, &category).await?;
            categories.delete(found.id).await?;
            println!("Deleted category: {}", found.name);
        }
    }

    Ok(())
}

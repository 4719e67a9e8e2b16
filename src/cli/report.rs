//! CLI commands for reports
//!
//! Reports fetch the current lists from the backend and aggregate locally.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::client::SpendwiseClient;
use crate::config::settings::Settings;
use crate::error::{ClientError, ClientResult};
use crate::reports::{BudgetOverview, SpendingReport};

use super::month_and_year;

/// Output format for the spending report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Terminal table
    Table,
    /// Comma-separated values
    Csv,
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Spending by category and year
    Spending {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: ReportFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Budgeted vs. spent for one month
    #[command(alias = "budget-overview")]
    Budget {
        /// Month (1-12), defaults to the current month
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Year, defaults to the current year
        #[arg(short, long)]
        year: Option<i32>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a report command
pub async fn handle_report_command(
    client: &SpendwiseClient,
    settings: &Settings,
    cmd: ReportCommands,
) -> ClientResult<()> {
    match cmd {
        ReportCommands::Spending { format, output } => {
            let expenses = client.expenses().fetch_all().await?;
            let categories = client.categories().fetch_all().await?;
            let report = SpendingReport::from_expenses(&expenses, &categories);

            match (format, output) {
                (ReportFormat::Table, None) => {
                    print!("{}", report.format_terminal(&settings.currency_symbol));
                }
                (ReportFormat::Table, Some(path)) => {
                    std::fs::write(&path, report.format_terminal(&settings.currency_symbol))?;
                    println!("Report written to {}", path.display());
                }
                (format, None) => {
                    let stdout = std::io::stdout();
                    write_spending(&report, format, stdout.lock())?;
                }
                (format, Some(path)) => {
                    write_spending(&report, format, create_output(&path)?)?;
                    println!("Report written to {}", path.display());
                }
            }
        }

        ReportCommands::Budget {
            month,
            year,
            output,
        } => {
            let (month, year) = month_and_year(month, year);
            let budgets = client.budgets().fetch_all().await?;
            let expenses = client.expenses().fetch_all().await?;
            let categories = client.categories().fetch_all().await?;
            let overview =
                BudgetOverview::generate(&budgets, &expenses, &categories, month, year);

            match output {
                Some(path) => {
                    overview.export_csv(create_output(&path)?)?;
                    println!("Report written to {}", path.display());
                }
                None => print!("{}", overview.format_terminal(&settings.currency_symbol)),
            }
        }
    }

    Ok(())
}

fn write_spending<W: std::io::Write>(
    report: &SpendingReport,
    format: ReportFormat,
    writer: W,
) -> ClientResult<()> {
    match format {
        ReportFormat::Csv => report.export_csv(writer),
        ReportFormat::Json => report.export_json(writer),
        ReportFormat::Yaml => report.export_yaml(writer),
        ReportFormat::Table => Err(ClientError::Export(
            "Table output is rendered, not exported".into(),
        )),
    }
}

fn create_output(path: &Path) -> ClientResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        ClientError::Export(format!("Failed to create {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

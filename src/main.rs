use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use spendwise_cli::cli::{
    handle_auth_command, handle_budget_command, handle_category_command, handle_expense_command,
    handle_report_command, AuthCommands,
};
use spendwise_cli::config::{paths::SpendwisePaths, settings::Settings};
use spendwise_cli::session::{FileTokenStore, Session};
use spendwise_cli::{ClientError, SpendwiseClient};

#[derive(Parser)]
#[command(
    name = "spendwise",
    author = "Kaylee Beyene",
    version,
    about = "Terminal client for the Spendwise personal-finance API",
    long_about = "Spendwise tracks where your money goes. Sign in, sort expenses \
                  into categories, set monthly budgets and see how spending \
                  compares, all from the command line."
)]
struct Cli {
    /// Origin of the Spendwise API (overrides the configured value)
    #[arg(long, global = true, env = "SPENDWISE_API_URL")]
    api_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Auth(AuthCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(spendwise_cli::cli::CategoryCommands),

    /// Expense management commands
    #[command(subcommand)]
    Expense(spendwise_cli::cli::ExpenseCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(spendwise_cli::cli::BudgetCommands),

    /// Spending and budget reports
    #[command(subcommand)]
    Report(spendwise_cli::cli::ReportCommands),

    /// Show current configuration and paths
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Initialize paths and settings
    let paths = SpendwisePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let api_url = cli
        .api_url
        .clone()
        .unwrap_or_else(|| settings.api_base_url.clone());

    let Some(command) = cli.command else {
        println!("Spendwise - track spending against monthly budgets");
        println!();
        println!("Run 'spendwise --help' for usage information.");
        println!("Run 'spendwise login <email>' to sign in.");
        return Ok(());
    };

    let session = Session::new(FileTokenStore::open(paths.session_file())?);

    if let Commands::Config = command {
        println!("Spendwise Configuration");
        println!("=======================");
        println!("Config directory: {}", paths.base_dir().display());
        println!("Settings file:    {}", paths.settings_file().display());
        println!("Session file:     {}", paths.session_file().display());
        println!();
        println!("Settings:");
        println!("  API URL:         {}", api_url);
        println!("  Currency symbol: {}", settings.currency_symbol);
        println!("  Date format:     {}", settings.date_format);
        println!("  Signed in:       {}", session.is_authenticated());
        return Ok(());
    }

    let client = SpendwiseClient::new(&api_url, session)?;

    match command {
        Commands::Auth(cmd) => handle_auth_command(&client, cmd).await?,
        Commands::Category(cmd) => handle_category_command(&client, &settings, cmd).await?,
        Commands::Expense(cmd) => handle_expense_command(&client, &settings, cmd).await?,
        Commands::Budget(cmd) => handle_budget_command(&client, &settings, cmd).await?,
        Commands::Report(cmd) => handle_report_command(&client, &settings, cmd).await?,
        Commands::Config => {}
    }

    Ok(())
}

/// Log to stderr; `SPENDWISE_LOG` / `RUST_LOG` win over `-v`
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("SPENDWISE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Print the error, then any per-field validation messages
fn report_error(err: &anyhow::Error) {
    eprintln!("Error: {}", err);

    let Some(api) = err
        .downcast_ref::<ClientError>()
        .and_then(ClientError::as_api)
    else {
        return;
    };
    if let Some(errors) = &api.errors {
        for (field, messages) in errors {
            for message in messages {
                eprintln!("  {}: {}", field, message);
            }
        }
    }
}

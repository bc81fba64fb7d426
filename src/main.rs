mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use healthmate::config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "healthmate", version, about = "Symptom assistant and local health log")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Talk to the health assistant
    Chat,
    /// View or change preferences
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Manage stored symptom logs
    Logs {
        #[command(subcommand)]
        action: LogsAction,
    },
    /// Check the local database
    Doctor,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the current preferences
    Show,
    /// Change one or more preferences
    Set(cli::settings::SetArgs),
}

#[derive(Subcommand)]
enum LogsAction {
    /// List stored symptom logs, newest first
    List,
    /// Record a symptom by hand
    Add(cli::log::AddArgs),
    /// Permanently delete every symptom log
    Clear,
    /// Print all symptom logs as JSON
    Export,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = config::HealthmateConfig::load()?;

    // Log to stderr so stdout stays clean for command output.
    let filter = EnvFilter::try_new(&config.logging.level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Chat => cli::chat::chat(&config).await?,
        Command::Settings { action } => match action {
            SettingsAction::Show => cli::settings::show(&config)?,
            SettingsAction::Set(args) => cli::settings::set(&config, args)?,
        },
        Command::Logs { action } => match action {
            LogsAction::List => cli::list::list(&config)?,
            LogsAction::Add(args) => cli::log::add(&config, args)?,
            LogsAction::Clear => cli::clear::clear(&config)?,
            LogsAction::Export => cli::export::export(&config)?,
        },
        Command::Doctor => cli::doctor::doctor(&config)?,
    }

    Ok(())
}

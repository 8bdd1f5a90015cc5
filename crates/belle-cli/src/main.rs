//! # belle CLI entry point
//!
//! Parses arguments, loads configuration, installs logging and dispatches
//! to the subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use belle_cli::config::BelleConfig;
use belle_cli::logging::init_tracing;
use belle_cli::receipt::{run_receipt, ReceiptArgs};
use belle_cli::wizard::{run_wizard, WizardArgs};

/// Belle marketplace toolkit.
///
/// Splits receipts into subtotal/TPS/TVQ and drives the provider
/// onboarding wizards from the terminal.
#[derive(Parser, Debug)]
#[command(name = "belle", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (defaults to $BELLE_CONFIG).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Receipt tax reconciliation (reconcile, gross-up, scan).
    Receipt(ReceiptArgs),

    /// Onboarding wizard sessions (start, set, next, back, jump, show, submit).
    Wizard(WizardArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = BelleConfig::load(cli.config.as_deref());
    let log_json = cli.log_json || config.as_ref().is_ok_and(|c| c.logging.json);
    init_tracing(cli.verbose, log_json);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(1);
        }
    };
    tracing::debug!(?config, "configuration loaded");

    let result = match &cli.command {
        Commands::Receipt(args) => run_receipt(args, &config),
        Commands::Wizard(args) => run_wizard(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

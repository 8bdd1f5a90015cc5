//! # Receipt Subcommand
//!
//! - `reconcile --total <amt>`: split a tax-inclusive total.
//! - `gross-up --subtotal <amt>`: rebuild taxes and total from a subtotal.
//! - `scan --file <json>`: resolve an OCR extraction
//!   (`{"total": .., "subtotal": .., "tps": .., "tvq": ..}`, all optional).
//!
//! Rates come from the config file; `--tps` / `--tvq` override them for one
//! invocation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use belle_core::{format_amount, TaxRateConfig};
use belle_tax::{gross_up, reconcile, ReceiptAmounts, ScannedReceipt};

use crate::config::BelleConfig;

/// Arguments for the `belle receipt` subcommand.
#[derive(Args, Debug)]
pub struct ReceiptArgs {
    #[command(subcommand)]
    pub command: ReceiptCommand,

    /// TPS rate in percent (overrides config).
    #[arg(long, global = true)]
    pub tps: Option<f64>,

    /// TVQ rate in percent (overrides config).
    #[arg(long, global = true)]
    pub tvq: Option<f64>,

    /// Print amounts as JSON.
    #[arg(long, global = true)]
    pub json: bool,
}

/// Receipt subcommands.
#[derive(Subcommand, Debug)]
pub enum ReceiptCommand {
    /// Split a tax-inclusive total into subtotal, TPS and TVQ.
    Reconcile {
        /// Tax-inclusive total.
        #[arg(long)]
        total: f64,
    },

    /// Compute TPS, TVQ and total from a pre-tax subtotal.
    GrossUp {
        /// Pre-tax subtotal.
        #[arg(long)]
        subtotal: f64,
    },

    /// Resolve a scanned-receipt extraction stored as JSON.
    Scan {
        /// Path to the extraction JSON.
        #[arg(long)]
        file: PathBuf,
    },
}

/// Execute the receipt subcommand. Returns the process exit code.
pub fn run_receipt(args: &ReceiptArgs, config: &BelleConfig) -> Result<u8> {
    let rates = effective_rates(&config.tax, args.tps, args.tvq)?;
    tracing::debug!(
        tps = rates.tps_rate_percent,
        tvq = rates.tvq_rate_percent,
        "using tax rates"
    );

    let amounts = match &args.command {
        ReceiptCommand::Reconcile { total } => reconcile(*total, &rates),
        ReceiptCommand::GrossUp { subtotal } => gross_up(*subtotal, &rates),
        ReceiptCommand::Scan { file } => {
            let content = std::fs::read_to_string(file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let scan: ScannedReceipt = serde_json::from_str(&content)
                .with_context(|| format!("failed to parse scan extraction {}", file.display()))?;
            scan.amounts(&rates)
        }
    };

    println!("{}", render_amounts(&amounts, args.json)?);
    Ok(0)
}

/// Apply per-invocation overrides to the configured rates and validate.
pub fn effective_rates(
    base: &TaxRateConfig,
    tps: Option<f64>,
    tvq: Option<f64>,
) -> Result<TaxRateConfig> {
    let rates = TaxRateConfig::new(
        tps.unwrap_or(base.tps_rate_percent),
        tvq.unwrap_or(base.tvq_rate_percent),
    )?;
    Ok(rates)
}

/// Render amounts as aligned text or pretty JSON.
pub fn render_amounts(amounts: &ReceiptAmounts, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(amounts).context("failed to serialize amounts");
    }
    let mut out = String::new();
    let rows = [
        ("subtotal", amounts.subtotal),
        ("tps", amounts.tps),
        ("tvq", amounts.tvq),
        ("total", amounts.total_amount),
    ];
    for (label, value) in rows {
        out.push_str(&format!("{label:<9}{:>12}\n", format_amount(value)));
    }
    let drift = amounts.rounding_drift();
    if drift != 0.0 {
        out.push_str(&format!("{:<9}{:>12}\n", "drift", format_amount(drift)));
    }
    Ok(out.trim_end().to_string())
}

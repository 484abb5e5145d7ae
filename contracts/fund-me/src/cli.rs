//! Dry-run command line front-end.
//!
//! Converts amounts and composes the batches the page would submit, then
//! prints them as JSON instead of sending anything.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use fundme_common::types::{CallBatch, FixedPointAmount};

use crate::{DappConfig, DryRunExecutor, FundMePage};

#[derive(Debug, Parser)]
#[command(name = "fund-me-cli", about = "Compose FundMe transactions without sending them")]
struct Cli {
    /// JSON config with contract names and deployments
    #[arg(long, short)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decimal amount to base units
    Convert {
        amount: String,
        /// Reject invalid input instead of treating it as zero
        #[arg(long)]
        strict: bool,
    },
    /// Base units to a decimal amount
    Format { raw: u128 },
    /// Compose the approve + fund batch
    Fund {
        #[arg(long, short)]
        amount: String,
    },
    /// Compose the withdraw call
    Withdraw,
}

#[derive(Debug, Serialize)]
struct BatchReport<'a> {
    digest: String,
    batch: &'a CallBatch,
}

#[derive(Debug, Serialize)]
struct ConversionReport<'a> {
    input: &'a str,
    base_units: FixedPointAmount,
    canonical: String,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<DappConfig> {
    let Some(path) = path else {
        return Ok(DappConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    DappConfig::from_json(&text).with_context(|| format!("loading config {}", path.display()))
}

fn print_batch(batch: &CallBatch) -> anyhow::Result<()> {
    let report = BatchReport {
        digest: hex::encode(batch.digest()),
        batch,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    let resolver = config.resolver();
    let mut page = FundMePage::new(config)?;

    match cli.command {
        Command::Convert { amount, strict } => {
            page.set_amount(amount.as_str());
            let base_units = if strict {
                page.validated_amount()?
            } else {
                page.fixed_point_amount()
            };
            let format = page.config().format()?;
            let report = ConversionReport {
                input: &amount,
                base_units,
                canonical: format.format(base_units).into_string(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Format { raw } => {
            let format = page.config().format()?;
            println!("{}", format.format(FixedPointAmount::new(raw)));
        }
        Command::Fund { amount } => {
            page.set_amount(amount);
            let executor = DryRunExecutor::new();
            page.fund(&resolver, &executor)?;
            for batch in executor.submitted() {
                print_batch(&batch)?;
            }
        }
        Command::Withdraw => {
            let executor = DryRunExecutor::new();
            page.withdraw(&executor)?;
            for batch in executor.submitted() {
                print_batch(&batch)?;
            }
        }
    }

    Ok(())
}

use std::path::PathBuf;

use clap::Parser;
use flownetics_roi_toolbox::{app, config, currency};

/// Interactive ROI calculator for Flownetics flow-chemistry programs.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the settings file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
    /// Override the display currency (inr, usd, eur).
    #[arg(long)]
    currency: Option<String>,
}

fn main() {
    if let Err(err) = try_run() {
        eprintln!("error: {err}");
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_default(&cli.config)?;
    if let Some(code) = cli.currency.as_deref() {
        match currency::parse_currency(code) {
            Some(c) => cfg.display_currency = c,
            None => return Err(format!("unknown currency: {code}").into()),
        }
    }
    app::run(&mut cfg, &cli.config)?;
    Ok(())
}

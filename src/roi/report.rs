use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::currency::{self, Currency};
use crate::roi::calculator::{RoiInput, RoiOutput};

/// Trimmed record kept when a visitor downloads the ROI report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSnapshot {
    pub name: String,
    pub email: String,
    pub currency: Currency,
    pub volume_tons_per_month: f64,
    pub num_steps: u8,
    pub roi_months: f64,
    pub total_cost_client_inr: f64,
    pub savings_after_faas_inr: f64,
    pub downloaded_at: DateTime<Utc>,
}

/// Builds the download record from one analysis, stamped with the
/// current UTC time.
pub fn snapshot(
    name: &str,
    email: &str,
    display_currency: Currency,
    input: &RoiInput,
    output: &RoiOutput,
) -> ReportSnapshot {
    ReportSnapshot {
        name: name.to_string(),
        email: email.to_string(),
        currency: display_currency,
        volume_tons_per_month: input.volume_tons_per_month,
        num_steps: input.num_process_steps,
        roi_months: output.roi_months,
        total_cost_client_inr: output.total_client_cost_inr,
        savings_after_faas_inr: output.net_annual_savings_inr,
        downloaded_at: Utc::now(),
    }
}

/// Report persistence errors.
#[derive(Debug)]
pub enum ReportError {
    /// File I/O error
    Io(std::io::Error),
    /// Snapshot serialization error
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io(e) => write!(f, "report I/O error: {e}"),
            ReportError::Serialize(e) => write!(f, "report serialization error: {e}"),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<std::io::Error> for ReportError {
    fn from(value: std::io::Error) -> Self {
        ReportError::Io(value)
    }
}

impl From<toml::ser::Error> for ReportError {
    fn from(value: toml::ser::Error) -> Self {
        ReportError::Serialize(value)
    }
}

/// Writes the snapshot as TOML into `dir`, one timestamped file per
/// download, and returns the file path.
pub fn save_snapshot(snap: &ReportSnapshot, dir: &Path) -> Result<PathBuf, ReportError> {
    fs::create_dir_all(dir)?;
    let file = dir.join(format!(
        "roi_download_{}.toml",
        snap.downloaded_at.format("%Y%m%d_%H%M%S")
    ));
    fs::write(&file, toml::to_string_pretty(snap)?)?;
    Ok(file)
}

/// Renders the full line-item analysis as plain text in the display
/// currency. This is the CLI's counterpart of the emailed report.
pub fn render_text_report(input: &RoiInput, output: &RoiOutput, cur: Currency) -> String {
    let money = |amount_inr: f64| currency::format_money_approx(amount_inr, cur);
    let mut out = String::new();
    let mut line = |s: String| {
        out.push_str(&s);
        out.push('\n');
    };

    line("=== Flownetics ROI Analysis ===".to_string());
    if output.roi_months > 0.0 {
        let roi_years = output.roi_months / 12.0;
        let annual_roi_percent =
            output.net_annual_savings_inr / output.total_client_cost_inr * 100.0;
        line(format!("Estimated payback: {:.1} months", output.roi_months));
        line(format!(
            "  ({roi_years:.1} years, {annual_roi_percent:.1}% annual ROI)"
        ));
    } else {
        line("Estimated payback: - (no positive net savings)".to_string());
    }
    line(String::new());

    line("-- Production --".to_string());
    line(format!(
        "Monthly volume:        {} tons",
        input.volume_tons_per_month
    ));
    line(format!(
        "Annual volume:         {} tons",
        output.annual_volume_tons
    ));
    let selected: Vec<&str> = input.reactions[..usize::from(input.num_process_steps)]
        .iter()
        .flatten()
        .map(|r| r.label())
        .collect();
    line(format!(
        "Process steps:         {} ({})",
        input.num_process_steps,
        selected.join(", ")
    ));
    line(String::new());

    line("-- Per-kg economics --".to_string());
    line(format!(
        "Current batch KSM:     {}",
        money(input.ksm_cost_per_kg_inr)
    ));
    line(format!(
        "Flownetics KSM:        {}",
        money(output.flownetics_cost_per_kg_inr)
    ));
    line(format!(
        "Savings per kg:        {}",
        money(output.savings_per_kg_inr)
    ));
    line(format!(
        "FaaS fee per kg:       {} ({}% of savings)",
        money(output.faas_fee_per_kg_inr),
        input.faas_fee_percent
    ));
    line(String::new());

    line("-- Annual economics --".to_string());
    line(format!(
        "Gross annual savings:  {}",
        money(output.annual_savings_inr)
    ));
    line(format!(
        "Annual FaaS fees:      {}",
        money(output.annual_faas_fees_inr)
    ));
    line(format!(
        "Net annual savings:    {}",
        money(output.net_annual_savings_inr)
    ));
    line(String::new());

    line("-- Investment --".to_string());
    line(format!(
        "Feasibility (gross):   {}",
        money(output.total_feasibility_cost_inr)
    ));
    line(format!(
        "Step discount:         {:.0}%",
        output.step_discount_rate * 100.0
    ));
    line(format!("Part A (feasibility):  {}", money(output.part_a_inr)));
    line(format!("Parts B+C:             {}", money(output.part_bc_inr)));
    line(format!(
        "Refundable deposit:    {} ({}x volume multiplier)",
        money(output.refundable_deposit_inr),
        output.volume_multiplier
    ));
    line(format!(
        "Interest on deposit:   {}",
        money(output.deposit_interest_inr)
    ));
    line(format!(
        "Total client cost:     {}",
        money(output.total_client_cost_inr)
    ));

    out
}

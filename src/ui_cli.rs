use std::io::{self, Write};
use std::path::Path;

use crate::app::AppError;
use crate::config::Config;
use crate::currency::{self, Currency};
use crate::roi::{self, calculator::ReactionType, RoiInput, RoiOutput};

/// Directory where report snapshots are written.
const REPORTS_DIR: &str = "reports";

/// Main menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Wizard,
    QuickCalculator,
    Settings,
    Exit,
}

/// Shows the main menu and returns the selection.
pub fn main_menu() -> Result<MenuChoice, AppError> {
    println!("\n=== Flownetics ROI Toolbox ===");
    println!("1) ROI wizard");
    println!("2) Quick calculator");
    println!("3) Settings");
    println!("0) Exit");
    loop {
        let sel = read_line("Select: ")?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Wizard),
            "2" => return Ok(MenuChoice::QuickCalculator),
            "3" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("Invalid selection, try again."),
        }
    }
}

/// Runs the four-step ROI wizard.
pub fn handle_wizard(cfg: &Config) -> Result<(), AppError> {
    println!("\n-- FaaS ROI Wizard --");

    // Step 1: basics
    println!("\n[1/4] Basic information");
    let cur = read_currency(cfg.display_currency)?;
    let num_steps = read_u8_in_range("Number of process steps (1-4): ", 1, 4)?;
    let volume = read_positive_f64("Monthly production volume [tons]: ")?;
    println!("Annual production: {} tons/year", volume * 12.0);

    // Step 2: process configuration. Every active step needs a selection
    // before the wizard moves on.
    println!("\n[2/4] Process configuration");
    let mut reactions: [Option<ReactionType>; 4] = [None; 4];
    for step in 0..num_steps {
        let reaction = read_reaction_type(step + 1)?;
        println!(
            "Feasibility cost: {}",
            currency::format_money_approx(cfg.cost_model.feasibility_fee_inr(reaction), cur)
        );
        reactions[usize::from(step)] = Some(reaction);
    }
    let gross_feasibility: f64 = reactions[..usize::from(num_steps)]
        .iter()
        .flatten()
        .map(|r| cfg.cost_model.feasibility_fee_inr(*r))
        .sum();
    println!(
        "Total feasibility cost: {}",
        currency::format_money_approx(gross_feasibility, cur)
    );
    println!(
        "Volume-based discount: {:.0}%",
        cfg.cost_model.step_discount_rate(num_steps) * 100.0
    );

    // Step 3: economics
    println!("\n[3/4] Economic parameters");
    let ksm_cost = read_ksm_cost()?;
    let faas_percent = read_u8_in_range("FaaS fee percentage (40-60): ", 40, 60)?;

    // Step 4: results
    println!("\n[4/4] Results");
    let input = RoiInput {
        num_process_steps: num_steps,
        reactions,
        volume_tons_per_month: volume,
        ksm_cost_per_kg_inr: ksm_cost,
        faas_fee_percent: faas_percent,
    };
    let output = roi::compute(&input, &cfg.cost_model)?;
    print_dashboard(&output, cur);
    println!("{}", roi::render_text_report(&input, &output, cur));
    offer_snapshot(&input, &output, cur)?;
    Ok(())
}

/// One-pass calculator: same engine, no step gating.
pub fn handle_quick_calculator(cfg: &Config) -> Result<(), AppError> {
    println!("\n-- Quick Calculator --");
    let cur = cfg.display_currency;
    let num_steps = read_u8_in_range("Number of process steps (1-4): ", 1, 4)?;
    let mut reactions: [Option<ReactionType>; 4] = [None; 4];
    for step in 0..num_steps {
        reactions[usize::from(step)] = read_reaction_type_optional(step + 1)?;
    }
    let volume = read_positive_f64("Monthly production volume [tons]: ")?;
    let ksm_cost = read_positive_f64("Current batch KSM cost [INR/kg]: ")?;
    let faas_percent = read_u8_in_range_or_default("FaaS fee percentage (40-60) [50]: ", 40, 60, 50)?;

    let input = RoiInput {
        num_process_steps: num_steps,
        reactions,
        volume_tons_per_month: volume,
        ksm_cost_per_kg_inr: ksm_cost,
        faas_fee_percent: faas_percent,
    };
    let output = roi::compute(&input, &cfg.cost_model)?;
    print_dashboard(&output, cur);
    Ok(())
}

/// Settings menu: display currency. The commercial parameters are edited
/// directly in config.toml.
pub fn handle_settings(cfg: &mut Config) -> Result<(), AppError> {
    println!("\n-- Settings --");
    println!("Display currency: {}", cfg.display_currency.code());
    println!("Commercial parameters (cost model) are read from config.toml.");
    let sel = read_line("New display currency (inr/usd/eur, empty to keep): ")?;
    let trimmed = sel.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    match currency::parse_currency(trimmed) {
        Some(c) => {
            cfg.display_currency = c;
            println!("Saved.");
        }
        None => println!("Unknown currency, keeping {}.", cfg.display_currency.code()),
    }
    Ok(())
}

fn print_dashboard(output: &RoiOutput, cur: Currency) {
    if output.roi_months > 0.0 {
        println!("Payback period:     {:.1} months", output.roi_months);
    } else {
        println!("Payback period:     -");
    }
    println!(
        "Net annual savings: {}",
        currency::format_money_approx(output.net_annual_savings_inr, cur)
    );
    println!(
        "Total client cost:  {}",
        currency::format_money_approx(output.total_client_cost_inr, cur)
    );
}

fn offer_snapshot(input: &RoiInput, output: &RoiOutput, cur: Currency) -> Result<(), AppError> {
    let sel = read_line("Save a report snapshot? (y/N): ")?;
    if !sel.trim().eq_ignore_ascii_case("y") {
        return Ok(());
    }
    let name = read_nonempty("Your name: ")?;
    let email = read_nonempty("Your email: ")?;
    let snap = roi::snapshot(&name, &email, cur, input, output);
    let path = roi::save_snapshot(&snap, Path::new(REPORTS_DIR))?;
    println!("Snapshot saved: {}", path.display());
    Ok(())
}

fn read_currency(current: Currency) -> Result<Currency, AppError> {
    loop {
        let sel = read_line(&format!(
            "Display currency (inr/usd/eur) [{}]: ",
            current.code()
        ))?;
        let trimmed = sel.trim();
        if trimmed.is_empty() {
            return Ok(current);
        }
        match currency::parse_currency(trimmed) {
            Some(c) => return Ok(c),
            None => println!("Unknown currency, use inr, usd or eur."),
        }
    }
}

fn read_reaction_type(step_no: u8) -> Result<ReactionType, AppError> {
    println!("Step {step_no} reaction type: 1=L-L 2=L-L+C 3=L-G 4=G-G");
    loop {
        let sel = read_line("Select: ")?;
        let reaction = match sel.trim() {
            "1" => Some(ReactionType::LiquidLiquid),
            "2" => Some(ReactionType::LiquidLiquidCatalyst),
            "3" => Some(ReactionType::LiquidGas),
            "4" => Some(ReactionType::GasGas),
            other => roi::parse_reaction_type(other),
        };
        match reaction {
            Some(r) => return Ok(r),
            None => println!("Select a reaction type for this step."),
        }
    }
}

fn read_reaction_type_optional(step_no: u8) -> Result<Option<ReactionType>, AppError> {
    let sel = read_line(&format!(
        "Step {step_no} reaction type (L-L, L-L+C, L-G, G-G, empty to skip): "
    ))?;
    Ok(roi::parse_reaction_type(sel.trim()))
}

/// KSM cost prompt with the wizard's entry rule: positive and at least
/// four digits typed.
fn read_ksm_cost() -> Result<f64, AppError> {
    loop {
        let s = read_line("Current batch KSM cost per kg [INR]: ")?;
        let digits = s.chars().filter(|c| c.is_ascii_digit()).count();
        match s.trim().parse::<f64>() {
            Ok(v) if v > 0.0 => {
                if digits >= 4 {
                    return Ok(v);
                }
                println!("Please enter a minimum of 4 digits.");
            }
            _ => println!("Enter a positive number."),
        }
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

fn read_f64(prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("Enter a number."),
        }
    }
}

fn read_positive_f64(prompt: &str) -> Result<f64, AppError> {
    loop {
        let v = read_f64(prompt)?;
        if v > 0.0 {
            return Ok(v);
        }
        println!("Enter a positive number.");
    }
}

fn read_u8_in_range(prompt: &str, min: u8, max: u8) -> Result<u8, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<u8>() {
            Ok(v) if (min..=max).contains(&v) => return Ok(v),
            _ => println!("Enter a whole number between {min} and {max}."),
        }
    }
}

fn read_u8_in_range_or_default(
    prompt: &str,
    min: u8,
    max: u8,
    default: u8,
) -> Result<u8, AppError> {
    loop {
        let s = read_line(prompt)?;
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(default);
        }
        match trimmed.parse::<u8>() {
            Ok(v) if (min..=max).contains(&v) => return Ok(v),
            _ => println!("Enter a whole number between {min} and {max}."),
        }
    }
}

fn read_nonempty(prompt: &str) -> Result<String, AppError> {
    loop {
        let s = read_line(prompt)?;
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
        println!("This field is required.");
    }
}

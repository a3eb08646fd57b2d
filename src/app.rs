use std::path::Path;

use crate::config::Config;
use crate::roi::calculator::RoiInputError;
use crate::roi::report::ReportError;
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// Application-level errors.
#[derive(Debug)]
pub enum AppError {
    /// Terminal I/O error
    Io(std::io::Error),
    /// Settings load/save error
    Config(crate::config::ConfigError),
    /// Calculator input rejected
    Input(RoiInputError),
    /// Report snapshot persistence error
    Report(ReportError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "I/O error: {e}"),
            AppError::Config(e) => write!(f, "settings error: {e}"),
            AppError::Input(e) => write!(f, "input error: {e}"),
            AppError::Report(e) => write!(f, "report error: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<RoiInputError> for AppError {
    fn from(value: RoiInputError) -> Self {
        AppError::Input(value)
    }
}

impl From<ReportError> for AppError {
    fn from(value: ReportError) -> Self {
        AppError::Report(value)
    }
}

/// Runs the main menu loop of the CLI application.
pub fn run(config: &mut Config, config_path: &Path) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu()? {
            MenuChoice::Wizard => ui_cli::handle_wizard(config)?,
            MenuChoice::QuickCalculator => ui_cli::handle_quick_calculator(config)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(config)?;
                config.save_to(config_path)?;
            }
            MenuChoice::Exit => {
                config.save_to(config_path)?;
                println!("Goodbye.");
                break;
            }
        }
    }
    Ok(())
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::currency::{self, Currency};
use crate::roi::calculator::CostModel;

/// Application settings: display currency plus the overridable
/// commercial parameters of the offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub display_currency: Currency,
    pub cost_model: CostModel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_currency: currency::locale_default(),
            cost_model: CostModel::default(),
        }
    }
}

/// Config load/save errors.
#[derive(Debug)]
pub enum ConfigError {
    /// File I/O error
    Io(std::io::Error),
    /// TOML parse error
    Serde(toml::de::Error),
    /// TOML serialization error
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Serde(e) => write!(f, "config parse error: {e}"),
            ConfigError::Serialize(e) => write!(f, "config serialization error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// Loads the config file, creating it with defaults on first run.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        Ok(cfg)
    }
}

impl Config {
    /// Writes the settings back as pretty TOML.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

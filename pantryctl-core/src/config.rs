//! Configuration for pantryctl
//!
//! Loaded from `~/.pantryctl/config.toml` (or `$PANTRYCTL_CONFIG`). Every
//! field has a default, so a missing file is not an error.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PantryError, Result};
use crate::purchase::MAX_EXPIRY_DAYS;

/// Upper bound for the expiring-items window
const MAX_THRESHOLD_DAYS: u32 = 365;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PantryConfig {
    pub ledger: LedgerConfig,
    pub advisor: AdvisorConfig,
    pub logging: LoggingConfig,
}

/// Defaults applied to purchases logged without explicit values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub default_quantity: u32,
    pub default_expiry_days: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_quantity: 1,
            default_expiry_days: 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Artificial wait before a suggestion is rendered
    pub response_delay_ms: u64,
    /// Items with this many whole days left (or fewer) count as expiring
    pub expiring_threshold_days: u32,
    /// Cap on ingredients listed in meal ideas
    pub meal_ingredient_limit: usize,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            response_delay_ms: 2000,
            expiring_threshold_days: 3,
            meal_ingredient_limit: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when neither RUST_LOG nor PANTRYCTL_LOG is set
    pub level: String,
    /// Log file used while the TUI owns the terminal
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl PantryConfig {
    /// Load config from the default path, then apply env overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        let mut config = Self::load_from(&path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|source| PantryError::TomlParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Config file path: $PANTRYCTL_CONFIG or ~/.pantryctl/config.toml
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var("PANTRYCTL_CONFIG") {
            return PathBuf::from(path);
        }
        Self::home_dir().join("config.toml")
    }

    /// ~/.pantryctl
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pantryctl")
    }

    /// Log file for TUI sessions (configured or ~/.pantryctl/pantryctl.log)
    pub fn log_file(&self) -> PathBuf {
        self.logging
            .file
            .clone()
            .map(|p| expand_home(&p))
            .unwrap_or_else(|| Self::home_dir().join("pantryctl.log"))
    }

    /// Apply PANTRYCTL_DELAY_MS and PANTRYCTL_LOG
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(raw) = env::var("PANTRYCTL_DELAY_MS") {
            self.advisor.response_delay_ms = raw.trim().parse().map_err(|_| {
                PantryError::config(format!("PANTRYCTL_DELAY_MS is not a number: '{}'", raw))
            })?;
        }
        if let Ok(level) = env::var("PANTRYCTL_LOG") {
            self.logging.level = level;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.advisor.expiring_threshold_days > MAX_THRESHOLD_DAYS {
            return Err(PantryError::config(format!(
                "advisor.expiring_threshold_days must be at most {}",
                MAX_THRESHOLD_DAYS
            )));
        }
        if self.ledger.default_quantity == 0 {
            return Err(PantryError::config("ledger.default_quantity must be at least 1"));
        }
        if self.ledger.default_expiry_days > MAX_EXPIRY_DAYS {
            return Err(PantryError::config(format!(
                "ledger.default_expiry_days must be at most {}",
                MAX_EXPIRY_DAYS
            )));
        }
        Ok(())
    }

    /// Write this config as TOML, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(rest),
        Err(_) => path.to_path_buf(),
    }
}

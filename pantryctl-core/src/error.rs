/// Structured error types for pantryctl-core.
///
/// The binary crate wraps these in `anyhow` for reporting, while the TUI
/// matches on them to decide between an alert popup and a fatal exit.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

/// Main error type for pantryctl-core operations
#[derive(Error, Debug)]
pub enum PantryError {
    /// User input was rejected
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// An assistant action was triggered before its input exists
    #[error("{reason}")]
    Precondition { action: &'static str, reason: String },

    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Config file could not be parsed
    #[error("Invalid config file {path:?}: {source}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Config could not be serialized
    #[error("Failed to serialize config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Configuration value out of range
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for pantryctl-core operations
pub type Result<T> = std::result::Result<T, PantryError>;

impl PantryError {
    /// Create a precondition error for an action
    pub fn precondition(action: &'static str, reason: impl Into<String>) -> Self {
        Self::Precondition {
            action,
            reason: reason.into(),
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Errors caused by user input rather than the environment.
    ///
    /// These are shown to the user as alerts and never abort the program.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Precondition { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PantryError::precondition("predict-missing", "Please add some purchases first!");
        assert_eq!(err.to_string(), "Please add some purchases first!");

        let err = PantryError::config("expiring_threshold_days must be at most 365");
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_user_facing_split() {
        let err: PantryError = ValidationError::Empty { field: "an item name" }.into();
        assert!(err.is_user_facing());

        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: PantryError = io_err.into();
        assert!(!err.is_user_facing());
        assert!(matches!(err, PantryError::Io { .. }));
    }
}

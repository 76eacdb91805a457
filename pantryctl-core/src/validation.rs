//! Validation errors for user-supplied purchase input

use std::fmt;

/// Rejected input, reported to the user without touching the ledger
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field is empty (after trimming) when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Value is present but unusable (zero quantity, negative price, ...)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Value doesn't name a known variant
    InvalidVariant { field: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "Please enter {}", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reads_like_a_prompt() {
        let err = ValidationError::Empty { field: "an item name" };
        assert_eq!(err.to_string(), "Please enter an item name");
    }

    #[test]
    fn too_long_display() {
        let err = ValidationError::TooLong {
            field: "item name",
            max: 128,
        };
        assert_eq!(
            err.to_string(),
            "item name exceeds maximum length of 128 characters"
        );
    }
}

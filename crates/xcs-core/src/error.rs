//! Error types for XCS operations.
//!
//! Only recoverable conditions live here: malformed input strings,
//! configuration problems, and situation/condition length mismatches
//! reported through the checked matching API. Broken call contracts
//! (updating an empty action set, selecting from an empty prediction
//! array) panic instead.

use thiserror::Error;

/// Result type for XCS operations.
pub type Result<T> = std::result::Result<T, XcsError>;

/// Errors that can occur during XCS operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum XcsError {
    /// Situation length differs from condition length.
    #[error("Situation length {found} does not match condition length {expected}")]
    LengthMismatch { expected: usize, found: usize },
    /// A character that is not a valid condition symbol.
    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(char),
    /// Configuration errors.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// I/O errors (wrapped).
    #[error("I/O error: {0}")]
    Io(String),
    /// TOML parse or serialization errors.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<std::io::Error> for XcsError {
    fn from(e: std::io::Error) -> Self {
        XcsError::Io(e.to_string())
    }
}

impl From<toml::de::Error> for XcsError {
    fn from(e: toml::de::Error) -> Self {
        XcsError::Parse(e.to_string())
    }
}

impl From<toml::ser::Error> for XcsError {
    fn from(e: toml::ser::Error) -> Self {
        XcsError::Parse(e.to_string())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Invalid value.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    /// Out of range.
    #[error("{field} out of range: {value} (must be {min}-{max})")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

// Convenience constructors
impl XcsError {
    pub fn length_mismatch(expected: usize, found: usize) -> Self {
        XcsError::LengthMismatch { expected, found }
    }

    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        XcsError::Config(ConfigError::OutOfRange {
            field: field.into(),
            min,
            max,
            value,
        })
    }

    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        XcsError::Config(ConfigError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        })
    }
}

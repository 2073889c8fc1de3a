//! Typed errors for configuration loading and validation
//!
//! Every rejection carries the offending field name and value so the caller
//! can build a user-facing message without re-parsing the config.

use thiserror::Error;

/// Errors raised while loading, validating, or querying a chain configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A required field is absent from the config document
    #[error("missing required config field `{field}`")]
    MissingField { field: String },

    /// A field is present but carries the wrong type
    #[error("config field `{field}` has an invalid type (expected {expected})")]
    InvalidType { field: String, expected: &'static str },

    /// A numeric field violates its allowed range
    #[error("config field `{field}` is out of range: {message} (got {value})")]
    OutOfRange {
        field: String,
        value: f64,
        message: String,
    },

    /// The requested APY scenario is not configured
    #[error("unknown APY scenario `{scenario}` (available: {available})")]
    UnknownScenario { scenario: String, available: String },
}

impl ConfigError {
    pub fn missing(field: impl Into<String>) -> Self {
        ConfigError::MissingField {
            field: field.into(),
        }
    }

    pub fn invalid_type(field: impl Into<String>, expected: &'static str) -> Self {
        ConfigError::InvalidType {
            field: field.into(),
            expected,
        }
    }

    pub fn out_of_range(field: impl Into<String>, value: f64, message: impl Into<String>) -> Self {
        ConfigError::OutOfRange {
            field: field.into(),
            value,
            message: message.into(),
        }
    }
}

//! Error types for the sanitization engine.
//!
//! Every failing operation returns one of these variants through the
//! ordinary `Result` channel, so a valid empty result is never confused
//! with a failure.

use thiserror::Error;

/// Result type alias for sanitization operations.
pub type SanitizeResult<T> = Result<T, SanitizeError>;

/// Error type for all sanitization operations.
#[derive(Debug, Error)]
pub enum SanitizeError {
    /// A rule pattern did not compile, or its replacement template could not
    /// be applied.
    #[error("Pattern error for '{pattern}': {reason}")]
    PatternFailure { pattern: String, reason: String },

    /// A date string could not be split or resolved to a calendar date.
    #[error("Unparsable date '{input}': {reason}")]
    UnparsableDate { input: String, reason: String },

    /// Invalid configuration or parameters
    #[error("Invalid input for '{parameter}': {reason}")]
    InvalidInput { parameter: String, reason: String },

    /// Country code with no rule table (strict mode only).
    #[error("Unsupported country '{country}'")]
    UnsupportedCountry { country: String },

    /// Dispatch to a name that is not a known operation.
    #[error("Unknown operation '{name}'")]
    UnknownOperation { name: String },

    /// Configuration could not be loaded.
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

impl SanitizeError {
    pub(crate) fn pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PatternFailure {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for the two failure kinds produced by the normalizers
    /// themselves, as opposed to caller or configuration mistakes.
    pub fn is_sanitization_failure(&self) -> bool {
        matches!(
            self,
            Self::PatternFailure { .. } | Self::UnparsableDate { .. }
        )
    }
}

impl From<regex::Error> for SanitizeError {
    fn from(err: regex::Error) -> Self {
        Self::PatternFailure {
            pattern: "<unknown>".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SanitizeError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidInput {
            parameter: "record".to_string(),
            reason: err.to_string(),
        }
    }
}

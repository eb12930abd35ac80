//! Engine configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use crate::domain::gender::GenderCodes;
use crate::error::{SanitizeError, SanitizeResult};
use crate::rules::MAX_PATTERN_LENGTH;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Country used when the caller passes none.
pub const DEFAULT_COUNTRY: &str = "au";

/// chrono strftime template for `YYYY-MM-DD`.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Settings shared by every operation of a [`crate::Sanitizer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SanitizerConfig {
    /// Country for phone and postal calls that name none.
    pub default_country: String,

    /// Output template for dates when the caller gives none.
    pub date_format: String,

    /// Reject countries without a rule table instead of passing the value
    /// through unchanged.
    pub strict_country: bool,

    /// Codes returned by the gender mapping.
    pub gender_codes: GenderCodes,

    /// Longest caller-supplied search pattern accepted, in bytes.
    pub max_pattern_len: usize,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            default_country: DEFAULT_COUNTRY.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            strict_country: false,
            gender_codes: GenderCodes::default(),
            max_pattern_len: MAX_PATTERN_LENGTH,
        }
    }
}

impl SanitizerConfig {
    pub fn from_json_str(json: &str) -> SanitizeResult<Self> {
        serde_json::from_str(json).map_err(|e| SanitizeError::Config {
            reason: e.to_string(),
        })
    }

    /// Reads a JSON config file.
    pub fn from_path(path: &Path) -> SanitizeResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| SanitizeError::Config {
            reason: format!("cannot read '{}': {}", path.display(), e),
        })?;
        Self::from_json_str(&text)
    }

    pub fn with_default_country(mut self, country: impl Into<String>) -> Self {
        self.default_country = country.into();
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    pub fn with_strict_country(mut self, strict: bool) -> Self {
        self.strict_country = strict;
        self
    }

    pub fn with_gender_codes(mut self, codes: GenderCodes) -> Self {
        self.gender_codes = codes;
        self
    }

    pub fn with_max_pattern_len(mut self, max_pattern_len: usize) -> Self {
        self.max_pattern_len = max_pattern_len;
        self
    }
}

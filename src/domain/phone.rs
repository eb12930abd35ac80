//! Phone number domain logic.
//!
//! Phone numbers are brought to their national form with a leading trunk
//! `0`: whitespace is removed, a missing trunk prefix is added and an
//! international country code is swapped for the trunk prefix.

use super::{FieldInput, RuleNormalizer, RuleRequest};
use crate::config::SanitizerConfig;
use crate::error::SanitizeResult;
use crate::rules::{Country, ReplaceEngine, RuleSet, RuleTable};

/// Country-aware phone number normalizer.
///
/// Supported tables:
/// - `au`: `412345678` → `0412345678`, `+61412345678` → `0412345678`
/// - `nz`: `21234567` → `021234567`, `+6421234567` → `021234567`,
///   `64211234567` → `0211234567`
#[derive(Debug, Clone, Default)]
pub struct PhoneNormalizer {
    engine: ReplaceEngine,
    config: SanitizerConfig,
}

impl PhoneNormalizer {
    /// Creates a normalizer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SanitizerConfig) -> Self {
        Self {
            engine: ReplaceEngine::new().with_max_pattern_len(config.max_pattern_len),
            config,
        }
    }

    /// Resolves the call context without running it.
    pub fn request(
        &self,
        input: impl Into<FieldInput>,
        country: Option<&str>,
    ) -> SanitizeResult<RuleRequest> {
        RuleRequest::resolve(self, input.into(), country, &self.config, &self.engine)
    }

    /// Runs a resolved request.
    pub fn apply(&self, request: &RuleRequest) -> String {
        request.run(&self.engine)
    }

    /// Normalizes a phone number.
    pub fn normalize(
        &self,
        input: impl Into<FieldInput>,
        country: Option<&str>,
    ) -> SanitizeResult<String> {
        Ok(self.apply(&self.request(input, country)?))
    }
}

impl RuleNormalizer for PhoneNormalizer {
    fn name(&self) -> &str {
        "phone"
    }

    fn rules_for(&self, country: Country) -> &'static RuleSet {
        RuleTable::phone(country)
    }
}

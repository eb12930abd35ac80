//! Postal code padding.

use super::{FieldInput, RuleNormalizer, RuleRequest};
use crate::config::SanitizerConfig;
use crate::error::SanitizeResult;
use crate::rules::{Country, ReplaceEngine, RuleSet, RuleTable};

/// Left-pads one to three digit postal codes to four digits.
///
/// Anything else (four or more digits, letters) passes through unchanged.
#[derive(Debug, Clone, Default)]
pub struct PostalNormalizer {
    engine: ReplaceEngine,
    config: SanitizerConfig,
}

impl PostalNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SanitizerConfig) -> Self {
        Self {
            engine: ReplaceEngine::new().with_max_pattern_len(config.max_pattern_len),
            config,
        }
    }

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

    pub fn normalize(
        &self,
        input: impl Into<FieldInput>,
        country: Option<&str>,
    ) -> SanitizeResult<String> {
        Ok(self.apply(&self.request(input, country)?))
    }
}

impl RuleNormalizer for PostalNormalizer {
    fn name(&self) -> &str {
        "postal"
    }

    fn rules_for(&self, country: Country) -> &'static RuleSet {
        RuleTable::postal(country)
    }
}

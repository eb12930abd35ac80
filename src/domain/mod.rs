//! Field normalizers.
//!
//! Phone and postal codes are rule-driven: a [`RuleRequest`] resolves the
//! caller's input into an immutable context (value, country, rule set) and
//! the [`ReplaceEngine`] runs it. Dates, email lists and gender labels use
//! their own algorithms.

pub mod date;
pub mod email;
pub mod gender;
pub mod phone;
pub mod postal;

pub use date::DateNormalizer;
pub use email::{EmailNormalizer, EmailValidator, SyntaxEmailValidator};
pub use gender::{Gender, GenderCodes, GenderMapper};
pub use phone::PhoneNormalizer;
pub use postal::PostalNormalizer;

use crate::config::SanitizerConfig;
use crate::error::{SanitizeError, SanitizeResult};
use crate::rules::{Country, ReplaceEngine, RuleSet};
use serde::Deserialize;
use std::borrow::Cow;
use tracing::{debug, warn};

/// Structured input for phone and postal calls.
///
/// Fields that are present override the call's arguments. A record carrying
/// both `searchPattern` and `replacePattern` replaces the country table with
/// its own rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    #[serde(alias = "check")]
    pub value: String,
    pub country: Option<String>,
    pub search_pattern: Option<Vec<String>>,
    pub replace_pattern: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Either a bare value or a [`FieldRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FieldInput {
    Value(String),
    Record(FieldRecord),
}

impl FieldInput {
    /// Parses a JSON string or JSON object.
    pub fn from_json(json: &str) -> SanitizeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Value(value) => value,
            Self::Record(record) => &record.value,
        }
    }
}

impl From<&str> for FieldInput {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for FieldInput {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<FieldRecord> for FieldInput {
    fn from(record: FieldRecord) -> Self {
        Self::Record(record)
    }
}

/// A normalizer driven by a per-country rule table.
pub trait RuleNormalizer: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Built-in rules for a supported country.
    fn rules_for(&self, country: Country) -> &'static RuleSet;
}

/// Resolved, immutable context for one rule-driven call.
#[derive(Debug, Clone)]
pub struct RuleRequest {
    pub value: String,
    /// Lower-cased country code that was applied, supported or not.
    pub country: String,
    pub rules: Cow<'static, RuleSet>,
    /// Auxiliary `type` tag carried by a record.
    pub tag: Option<String>,
}

impl RuleRequest {
    /// Merges input, argument country and config into a request.
    ///
    /// Country precedence: record, then argument, then the configured
    /// default. Custom record patterns win over the country table.
    pub fn resolve(
        normalizer: &dyn RuleNormalizer,
        input: FieldInput,
        country: Option<&str>,
        config: &SanitizerConfig,
        engine: &ReplaceEngine,
    ) -> SanitizeResult<Self> {
        let (value, record_country, patterns, tag) = match input {
            FieldInput::Value(value) => (value, None, None, None),
            FieldInput::Record(record) => {
                let patterns = match (record.search_pattern, record.replace_pattern) {
                    (Some(search), Some(replace)) => Some((search, replace)),
                    (None, None) => None,
                    _ => {
                        return Err(SanitizeError::pattern(
                            normalizer.name(),
                            "searchPattern and replacePattern must be given together",
                        ))
                    }
                };
                (record.value, record.country, patterns, record.kind)
            }
        };

        let country = record_country
            .as_deref()
            .or(country)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(&config.default_country)
            .to_lowercase();

        let rules = match patterns {
            Some((search, replace)) => {
                debug!(
                    normalizer = normalizer.name(),
                    steps = search.len(),
                    "using custom rule set"
                );
                Cow::Owned(engine.compile(&search, &replace)?)
            }
            None => match Country::lookup(&country) {
                Some(known) => Cow::Borrowed(normalizer.rules_for(known)),
                None if config.strict_country => {
                    return Err(SanitizeError::UnsupportedCountry { country });
                }
                None => {
                    warn!(
                        normalizer = normalizer.name(),
                        country = country.as_str(),
                        "no rule table for country, value passes through unchanged"
                    );
                    Cow::Owned(RuleSet::empty())
                }
            },
        };

        Ok(Self {
            value,
            country,
            rules,
            tag,
        })
    }

    /// Runs the resolved rules.
    pub fn run(&self, engine: &ReplaceEngine) -> String {
        engine.apply(&self.value, &self.rules)
    }
}

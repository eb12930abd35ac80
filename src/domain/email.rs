//! Email address list sanitization.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Characters allowed through the address filter besides ASCII letters and
/// digits.
const ALLOWED_PUNCTUATION: &str = "!#$%&'*+-=?^_`{|}~@.[]";

/// Longest address the default validator accepts.
const MAX_ADDRESS_LENGTH: usize = 254;

/// Syntactic email check, supplied by the caller or [`SyntaxEmailValidator`].
pub trait EmailValidator: Send + Sync {
    fn is_valid_email(&self, address: &str) -> bool;
}

impl<F> EmailValidator for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_valid_email(&self, address: &str) -> bool {
        self(address)
    }
}

/// Regex-based `local@domain` check.
///
/// The local part is dot-separated atoms; the domain is two or more
/// hostname labels ending in an alphabetic TLD.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxEmailValidator;

impl SyntaxEmailValidator {
    fn regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$",
            )
            .expect("Valid email regex")
        });
        &PATTERN
    }
}

impl EmailValidator for SyntaxEmailValidator {
    fn is_valid_email(&self, address: &str) -> bool {
        address.len() <= MAX_ADDRESS_LENGTH && Self::regex().is_match(address)
    }
}

/// Strips every character that cannot appear in an address.
pub fn filter_address(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || ALLOWED_PUNCTUATION.contains(*c))
        .collect()
}

/// Splits a `;`/`,` separated list, keeps the valid addresses and rejoins
/// them with `;`.
pub struct EmailNormalizer {
    validator: Box<dyn EmailValidator>,
}

impl EmailNormalizer {
    /// Creates a normalizer using [`SyntaxEmailValidator`].
    pub fn new() -> Self {
        Self::with_validator(Box::new(SyntaxEmailValidator))
    }

    pub fn with_validator(validator: Box<dyn EmailValidator>) -> Self {
        Self { validator }
    }

    /// Never fails; an empty or fully invalid list yields `""`.
    pub fn normalize(&self, value: &str) -> String {
        let mut dropped = 0usize;
        let kept: Vec<String> = value
            .split([';', ','])
            .filter_map(|raw| {
                let address = filter_address(raw);
                if !address.is_empty() && self.validator.is_valid_email(&address) {
                    Some(address)
                } else {
                    dropped += 1;
                    None
                }
            })
            .collect();

        debug!(kept = kept.len(), dropped, "email list sanitized");
        kept.join(";")
    }
}

impl Default for EmailNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EmailNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailNormalizer").finish_non_exhaustive()
    }
}

//! The sanitization engine.
//!
//! [`Sanitizer`] owns one normalizer per field kind and a
//! [`SanitizationSession`]. Callers create their own instance; for
//! concurrent work, create one per task.

use crate::config::SanitizerConfig;
use crate::dispatch::Operation;
use crate::domain::{
    DateNormalizer, EmailNormalizer, EmailValidator, FieldInput, Gender, GenderMapper,
    PhoneNormalizer, PostalNormalizer,
};
use crate::error::{SanitizeError, SanitizeResult};
use crate::session::SanitizationSession;
use tracing::debug;

/// Sanitization service coordinating the field normalizers.
#[derive(Debug)]
pub struct Sanitizer {
    config: SanitizerConfig,
    phone: PhoneNormalizer,
    postal: PostalNormalizer,
    date: DateNormalizer,
    email: EmailNormalizer,
    gender: GenderMapper,
    session: SanitizationSession,
}

impl Sanitizer {
    /// Creates a sanitizer with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SanitizerConfig::default())
    }

    pub fn with_config(config: SanitizerConfig) -> Self {
        Self {
            phone: PhoneNormalizer::with_config(config.clone()),
            postal: PostalNormalizer::with_config(config.clone()),
            date: DateNormalizer::new().with_format(config.date_format.clone()),
            email: EmailNormalizer::new(),
            gender: GenderMapper::new(),
            session: SanitizationSession::new(),
            config,
        }
    }

    /// Replaces the email address validator.
    pub fn with_email_validator(mut self, validator: Box<dyn EmailValidator>) -> Self {
        self.email = EmailNormalizer::with_validator(validator);
        self
    }

    pub fn config(&self) -> &SanitizerConfig {
        &self.config
    }

    /// Context of the most recent operation.
    pub fn session(&self) -> &SanitizationSession {
        &self.session
    }

    /// Whether the most recent operation failed.
    pub fn last_failed(&self) -> Option<bool> {
        self.session.last_failed()
    }

    /// Normalizes a phone number for `country` (default from config).
    pub fn phone(
        &mut self,
        input: impl Into<FieldInput>,
        country: Option<&str>,
    ) -> SanitizeResult<String> {
        let input = input.into();
        self.session.begin(Operation::Phone, input.value());
        let result = self.phone.request(input, country).map(|request| {
            self.session.activate(&request);
            self.phone.apply(&request)
        });
        self.finish(result)
    }

    /// Pads a postal code to four digits.
    pub fn postal(
        &mut self,
        input: impl Into<FieldInput>,
        country: Option<&str>,
    ) -> SanitizeResult<String> {
        let input = input.into();
        self.session.begin(Operation::Postal, input.value());
        let result = self.postal.request(input, country).map(|request| {
            self.session.activate(&request);
            self.postal.apply(&request)
        });
        self.finish(result)
    }

    /// Normalizes a date; `format` overrides the configured output format.
    pub fn date(&mut self, value: &str, format: Option<&str>) -> SanitizeResult<String> {
        self.session.begin(Operation::Date, value);
        let result = match format.filter(|f| !f.is_empty()) {
            Some(format) => self.date.normalize_with(value, format),
            None => self.date.normalize(value),
        };
        self.finish(result)
    }

    /// Keeps the valid addresses of a `;`/`,` separated list.
    pub fn email(&mut self, value: &str) -> String {
        self.session.begin(Operation::Email, value);
        let kept = self.email.normalize(value);
        self.session.record(false);
        kept
    }

    /// Maps a gender label to its configured code.
    pub fn gender(&mut self, value: &str) -> String {
        let gender = self.gender_of(value);
        self.config.gender_codes.code(gender).to_string()
    }

    /// Maps a gender label to a [`Gender`].
    pub fn gender_of(&mut self, value: &str) -> Gender {
        self.session.begin(Operation::Gender, value);
        let gender = self.gender.map(value);
        self.session.record(false);
        gender
    }

    /// Runs the operation called `name` with positional arguments.
    pub fn invoke_named(&mut self, name: &str, args: &[&str]) -> SanitizeResult<String> {
        let operation: Operation = name.parse()?;
        self.invoke(operation, args)
    }

    /// Runs `operation` with positional arguments: the value, then the
    /// country or output format where the operation takes one.
    pub fn invoke(&mut self, operation: Operation, args: &[&str]) -> SanitizeResult<String> {
        let Some((&value, rest)) = args.split_first() else {
            return Err(SanitizeError::invalid(
                operation.name(),
                "a value argument is required",
            ));
        };
        if args.len() > operation.max_args() {
            return Err(SanitizeError::invalid(
                operation.name(),
                format!(
                    "takes at most {} arguments, got {}",
                    operation.max_args(),
                    args.len()
                ),
            ));
        }

        let option = rest.first().copied();
        match operation {
            Operation::Phone => self.phone(value, option),
            Operation::Postal => self.postal(value, option),
            Operation::Date => self.date(value, option),
            Operation::Email => Ok(self.email(value)),
            Operation::Gender => Ok(self.gender(value)),
        }
    }

    fn finish(&mut self, result: SanitizeResult<String>) -> SanitizeResult<String> {
        let failed = result.is_err();
        self.session.record(failed);
        debug!(
            operation = self.session.kind().map(Operation::name),
            failed, "operation finished"
        );
        result
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

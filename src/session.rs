//! Per-operation context.
//!
//! A [`SanitizationSession`] records what the most recent operation worked
//! on and whether it failed. It is owned by one [`crate::Sanitizer`] and
//! cleared at the start of every operation, so nothing carries over between
//! calls. Mutation goes through `&mut`, which keeps a session to a single
//! caller at a time.

use crate::dispatch::Operation;
use crate::domain::RuleRequest;
use crate::rules::RuleSet;
use std::borrow::Cow;

#[derive(Debug, Clone, Default)]
pub struct SanitizationSession {
    value: Option<String>,
    country: Option<String>,
    rule_set: Option<Cow<'static, RuleSet>>,
    kind: Option<Operation>,
    tag: Option<String>,
    error_log: Vec<bool>,
}

impl SanitizationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Resets, then records the operation and its input.
    pub(crate) fn begin(&mut self, kind: Operation, value: &str) {
        self.reset();
        self.kind = Some(kind);
        self.value = Some(value.to_string());
    }

    /// Records the resolved context of a rule-driven call.
    pub(crate) fn activate(&mut self, request: &RuleRequest) {
        self.value = Some(request.value.clone());
        self.country = Some(request.country.clone());
        self.rule_set = Some(request.rules.clone());
        self.tag = request.tag.clone();
    }

    /// Appends one outcome flag; `true` means the operation failed.
    pub(crate) fn record(&mut self, failed: bool) {
        self.error_log.push(failed);
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn rule_set(&self) -> Option<&RuleSet> {
        self.rule_set.as_deref()
    }

    pub fn kind(&self) -> Option<Operation> {
        self.kind
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn error_log(&self) -> &[bool] {
        &self.error_log
    }

    /// Outcome of the most recent operation, if one finished.
    pub fn last_failed(&self) -> Option<bool> {
        self.error_log.last().copied()
    }
}

//! Ordered search/replace rule sets and the engine that applies them.
//!
//! A [`RuleSet`] is an ordered list of (pattern, template) steps. The
//! [`ReplaceEngine`] runs the steps cumulatively: each step sees the output of
//! the step before it. Templates are checked against their pattern when the
//! rule set is compiled, so a bad back-reference fails the whole operation
//! before any step runs.

pub mod tables;

pub use tables::{Country, RuleTable};

use crate::error::{SanitizeError, SanitizeResult};
use regex::{Captures, Regex, RegexBuilder};
use std::fmt;
use tracing::{debug, trace};

/// Default upper bound on caller-supplied pattern length, in bytes.
pub const MAX_PATTERN_LENGTH: usize = 1024;

/// Compiled regex size limit for caller-supplied patterns.
const COMPILED_SIZE_LIMIT: usize = 1 << 20;

/// One piece of a parsed replacement template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Group(usize),
    Named(String),
}

/// A replacement template with `$N`, `${N}`, `${name}` and `\N` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parses a template string.
    ///
    /// `$$` is a literal dollar sign. A `$` or `\` not followed by a
    /// placeholder is kept as-is.
    pub fn parse(source: &str) -> SanitizeResult<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let bytes = source.as_bytes();
        let mut i = 0;

        while i < bytes.len() {
            let c = bytes[i];
            if c == b'$' && bytes.get(i + 1) == Some(&b'$') {
                literal.push('$');
                i += 2;
                continue;
            }
            if c == b'$' && bytes.get(i + 1) == Some(&b'{') {
                let rest = &source[i + 2..];
                let end = rest.find('}').ok_or_else(|| {
                    SanitizeError::pattern(source, "unterminated '${' placeholder")
                })?;
                let name = &rest[..end];
                let segment = if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) {
                    Segment::Group(parse_index(source, name)?)
                } else if is_group_name(name) {
                    Segment::Named(name.to_string())
                } else {
                    return Err(SanitizeError::pattern(
                        source,
                        format!("invalid placeholder '${{{}}}'", name),
                    ));
                };
                flush(&mut literal, &mut segments);
                segments.push(segment);
                i += end + 3;
                continue;
            }
            if c == b'$' || c == b'\\' {
                let digits = leading_digits(&bytes[i + 1..]);
                if digits > 0 {
                    flush(&mut literal, &mut segments);
                    let index = parse_index(source, &source[i + 1..i + 1 + digits])?;
                    segments.push(Segment::Group(index));
                    i += 1 + digits;
                    continue;
                }
            }
            // Copy one full UTF-8 character.
            let ch_len = source[i..].chars().next().map_or(1, char::len_utf8);
            literal.push_str(&source[i..i + ch_len]);
            i += ch_len;
        }
        flush(&mut literal, &mut segments);

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The template as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Checks that every placeholder names a group `pattern` defines.
    fn check_against(&self, pattern: &Regex) -> SanitizeResult<()> {
        for segment in &self.segments {
            match segment {
                Segment::Group(index) if *index >= pattern.captures_len() => {
                    return Err(SanitizeError::pattern(
                        pattern.as_str(),
                        format!(
                            "template '{}' references group {} but the pattern has {}",
                            self.source,
                            index,
                            pattern.captures_len() - 1
                        ),
                    ));
                }
                Segment::Named(name) if !has_group_named(pattern, name) => {
                    return Err(SanitizeError::pattern(
                        pattern.as_str(),
                        format!(
                            "template '{}' references unknown group '{}'",
                            self.source, name
                        ),
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Expands the template for one match. Groups that did not participate
    /// in the match expand to nothing.
    fn expand(&self, caps: &Captures<'_>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Group(index) => {
                    if let Some(m) = caps.get(*index) {
                        out.push_str(m.as_str());
                    }
                }
                Segment::Named(name) => {
                    if let Some(m) = caps.name(name) {
                        out.push_str(m.as_str());
                    }
                }
            }
        }
        out
    }
}

fn flush(literal: &mut String, segments: &mut Vec<Segment>) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

// Placeholders take at most two digits, so "$123" is group 12 then "3".
fn leading_digits(bytes: &[u8]) -> usize {
    bytes.iter().take(2).take_while(|b| b.is_ascii_digit()).count()
}

fn parse_index(source: &str, digits: &str) -> SanitizeResult<usize> {
    digits
        .parse()
        .map_err(|_| SanitizeError::pattern(source, format!("bad group index '{}'", digits)))
}

fn has_group_named(pattern: &Regex, name: &str) -> bool {
    pattern.capture_names().flatten().any(|n| n == name)
}

fn is_group_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A single compiled search/replace step.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    template: Template,
}

impl Rule {
    /// Pairs a compiled pattern with a template, checking back-references.
    pub fn new(pattern: Regex, template: &str) -> SanitizeResult<Self> {
        let template = Template::parse(template)?;
        template.check_against(&pattern)?;
        Ok(Self { pattern, template })
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Replaces every non-overlapping match in `value`.
    fn apply(&self, value: &str) -> String {
        self.pattern
            .replace_all(value, |caps: &Captures<'_>| self.template.expand(caps))
            .into_owned()
    }
}

/// An ordered, cumulative sequence of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// A rule set with no steps; applying it returns the input unchanged.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Builds a rule set from built-in (pattern, template) pairs.
    pub(crate) fn from_pairs(pairs: &[(&str, &str)]) -> SanitizeResult<Self> {
        pairs
            .iter()
            .map(|(pattern, template)| {
                let regex = Regex::new(pattern)
                    .map_err(|e| SanitizeError::pattern(*pattern, e.to_string()))?;
                Rule::new(regex, template)
            })
            .collect::<SanitizeResult<Vec<_>>>()
            .map(Self::from_rules)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let steps: Vec<String> = self
            .rules
            .iter()
            .map(|r| format!("/{}/ -> '{}'", r.pattern().as_str(), r.template().as_str()))
            .collect();
        write!(f, "[{}]", steps.join(", "))
    }
}

/// Applies rule sets and compiles caller-supplied ones.
#[derive(Debug, Clone)]
pub struct ReplaceEngine {
    max_pattern_len: usize,
}

impl ReplaceEngine {
    pub fn new() -> Self {
        Self {
            max_pattern_len: MAX_PATTERN_LENGTH,
        }
    }

    /// Sets the maximum accepted length of a caller-supplied pattern.
    pub fn with_max_pattern_len(mut self, max_pattern_len: usize) -> Self {
        self.max_pattern_len = max_pattern_len;
        self
    }

    /// Compiles parallel search and replace sequences into a rule set.
    ///
    /// Fails if the sequences differ in length, a pattern is too long or
    /// malformed, or a template references a group its pattern lacks.
    pub fn compile<S, R>(&self, search: &[S], replace: &[R]) -> SanitizeResult<RuleSet>
    where
        S: AsRef<str>,
        R: AsRef<str>,
    {
        if search.len() != replace.len() {
            return Err(SanitizeError::pattern(
                search
                    .iter()
                    .map(|s| s.as_ref())
                    .collect::<Vec<_>>()
                    .join(", "),
                format!(
                    "{} search patterns but {} replacement templates",
                    search.len(),
                    replace.len()
                ),
            ));
        }

        let mut rules = Vec::with_capacity(search.len());
        for (pattern, template) in search.iter().zip(replace) {
            let pattern = pattern.as_ref();
            if pattern.len() > self.max_pattern_len {
                return Err(SanitizeError::pattern(
                    truncate(pattern, 32),
                    format!(
                        "pattern length {} exceeds maximum {}",
                        pattern.len(),
                        self.max_pattern_len
                    ),
                ));
            }
            let regex = RegexBuilder::new(pattern)
                .size_limit(COMPILED_SIZE_LIMIT)
                .build()
                .map_err(|e| SanitizeError::pattern(pattern, e.to_string()))?;
            rules.push(Rule::new(regex, template.as_ref())?);
        }

        debug!(steps = rules.len(), "compiled custom rule set");
        Ok(RuleSet::from_rules(rules))
    }

    /// Runs every rule of `rules` over `value` in order.
    pub fn apply(&self, value: &str, rules: &RuleSet) -> String {
        rules.iter().enumerate().fold(value.to_string(), |current, (step, rule)| {
            let next = rule.apply(&current);
            trace!(
                step,
                pattern = rule.pattern.as_str(),
                changed = next != current,
                "rule applied"
            );
            next
        })
    }

    /// Compiles and applies in one call; nothing is produced unless every
    /// step compiles.
    pub fn apply_patterns<S, R>(
        &self,
        value: &str,
        search: &[S],
        replace: &[R],
    ) -> SanitizeResult<String>
    where
        S: AsRef<str>,
        R: AsRef<str>,
    {
        let rules = self.compile(search, replace)?;
        Ok(self.apply(value, &rules))
    }
}

impl Default for ReplaceEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

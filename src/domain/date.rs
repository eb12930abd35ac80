//! Calendar date normalization.
//!
//! Input is split on the first of `/`, `-`, `.` that yields exactly three
//! non-empty parts. The parts are read day-first (`d/m/y`) and, failing
//! that, year-first (`y/m/d`). The month is always the middle part.

use crate::config::DEFAULT_DATE_FORMAT;
use crate::error::{SanitizeError, SanitizeResult};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use std::fmt::Write;
use tracing::debug;

/// Delimiters in the order they are tried.
pub const DELIMITERS: [char; 3] = ['/', '-', '.'];

/// Largest year accepted by the calendar check. Five-digit years would be
/// printed with a sign by `%Y` and could not be parsed back.
const MAX_YEAR: u32 = 9999;

/// Which reading of the three parts produced the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    DayFirst,
    YearFirst,
}

/// Date sanitizer producing a chrono strftime-formatted string.
#[derive(Debug, Clone)]
pub struct DateNormalizer {
    format: String,
}

impl DateNormalizer {
    /// Creates a normalizer emitting `YYYY-MM-DD`.
    pub fn new() -> Self {
        Self {
            format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Normalizes using the configured output format.
    pub fn normalize(&self, value: &str) -> SanitizeResult<String> {
        self.normalize_with(value, &self.format)
    }

    /// Normalizes using an explicit output format.
    pub fn normalize_with(&self, value: &str, format: &str) -> SanitizeResult<String> {
        check_format(format)?;
        let (date, order) = Self::resolve(value)?;
        debug!(?order, "date resolved");
        render(date, format)
    }

    /// Parses `value` into a calendar date, reporting the reading used.
    pub fn resolve(value: &str) -> SanitizeResult<(NaiveDate, DateOrder)> {
        let [first, month, last] = split_parts(value).ok_or_else(|| unparsable(
            value,
            "no delimiter splits the value into three parts",
        ))?;

        let readings = [
            (DateOrder::DayFirst, first, last),
            (DateOrder::YearFirst, last, first),
        ];
        readings
            .into_iter()
            .find_map(|(order, day, year)| {
                calendar_date(year, month, day).map(|date| (date, order))
            })
            .ok_or_else(|| unparsable(value, "neither day-first nor year-first is a valid date"))
    }
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits on the first delimiter giving exactly three non-empty parts.
pub fn split_parts(value: &str) -> Option<[&str; 3]> {
    let value = value.trim();
    DELIMITERS.iter().find_map(|&delimiter| {
        let mut parts = value.split(delimiter);
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(a), Some(b), Some(c), None)
                if !a.is_empty() && !b.is_empty() && !c.is_empty() =>
            {
                Some([a, b, c])
            }
            _ => None,
        }
    })
}

/// Gregorian validity check on the raw numbers, then two-digit year
/// expansion for the returned date.
fn calendar_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let year = parse_number(year)?;
    let month = parse_number(month)?;
    let day = parse_number(day)?;

    if !(1..=MAX_YEAR).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)?;

    let expanded = match year {
        0..=69 => year + 2000,
        70..=100 => year + 1900,
        _ => year,
    };
    NaiveDate::from_ymd_opt(i32::try_from(expanded).ok()?, month, day)
}

fn parse_number(part: &str) -> Option<u32> {
    let part = part.trim();
    if part.is_empty() || part.len() > 9 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn check_format(format: &str) -> SanitizeResult<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(SanitizeError::invalid(
            "format",
            format!("'{}' is not a valid date format", format),
        ));
    }
    Ok(())
}

/// Formats the date at midnight so time specifiers render as zeros. Zone
/// specifiers have no offset to print and fail here.
fn render(date: NaiveDate, format: &str) -> SanitizeResult<String> {
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
        SanitizeError::invalid("format", format!("cannot format {} at midnight", date))
    })?;
    let mut out = String::new();
    write!(out, "{}", midnight.format(format)).map_err(|_| {
        SanitizeError::invalid(
            "format",
            format!("'{}' needs a time zone, which dates do not carry", format),
        )
    })?;
    Ok(out)
}

fn unparsable(value: &str, reason: &str) -> SanitizeError {
    SanitizeError::UnparsableDate {
        input: value.to_string(),
        reason: reason.to_string(),
    }
}

//! Built-in country rule tables.
//!
//! Digit classes are spelled `[0-9]` rather than `\d` so that only ASCII
//! digits are matched.

use super::RuleSet;
use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;

/// Countries with built-in phone and postal tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Country {
    Au,
    Nz,
}

impl Country {
    /// Two-letter lower-case code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Au => "au",
            Self::Nz => "nz",
        }
    }

    /// Case-insensitive lookup; `None` for anything without a table.
    pub fn lookup(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "au" => Some(Self::Au),
            "nz" => Some(Self::Nz),
            _ => None,
        }
    }
}

impl FromStr for Country {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| format!("unsupported country '{}'", s.trim()))
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Static, country-keyed rule tables.
pub struct RuleTable;

impl RuleTable {
    /// Phone normalization steps for `country`.
    pub fn phone(country: Country) -> &'static RuleSet {
        match country {
            Country::Au => Self::phone_au(),
            Country::Nz => Self::phone_nz(),
        }
    }

    /// Postal code steps. Both countries share the same four-digit table.
    pub fn postal(country: Country) -> &'static RuleSet {
        match country {
            Country::Au | Country::Nz => Self::postal_four_digit(),
        }
    }

    fn phone_nz() -> &'static RuleSet {
        static RULES: Lazy<RuleSet> = Lazy::new(|| {
            RuleSet::from_pairs(&[
                // whitespace
                (r"\s", ""),
                // 8-digit landline without trunk prefix
                (r"^([1-9])([0-9]{7})$", "0${1}${2}"),
                // mobile range 2x, 9 or 10 digits
                (r"^(2)([0-9]{8,9})$", "0${1}${2}"),
                // (+)64 followed by 8 digits
                (r"^(\+?64)([0-9]{8})$", "0${2}"),
                // (+)64 followed by a mobile number
                (r"^(\+?64)(2)([0-9]{8,9})$", "0${2}${3}"),
            ])
            .expect("Valid NZ phone rules")
        });
        &RULES
    }

    fn phone_au() -> &'static RuleSet {
        static RULES: Lazy<RuleSet> = Lazy::new(|| {
            RuleSet::from_pairs(&[
                (r"\s", ""),
                // 9 digits without trunk prefix
                (r"^([1-9])([0-9]{8})$", "0${1}${2}"),
                // (+)61 followed by 9 digits
                (r"^(\+?61)([0-9]{9})$", "0${2}"),
            ])
            .expect("Valid AU phone rules")
        });
        &RULES
    }

    fn postal_four_digit() -> &'static RuleSet {
        static RULES: Lazy<RuleSet> = Lazy::new(|| {
            RuleSet::from_pairs(&[
                (r"^[0-9]{1}$", "000$0"),
                (r"^[0-9]{2}$", "00$0"),
                (r"^[0-9]{3}$", "0$0"),
            ])
            .expect("Valid postal rules")
        });
        &RULES
    }
}

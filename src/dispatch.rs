//! Operation names for by-name dispatch.

use crate::error::SanitizeError;
use std::fmt;
use std::str::FromStr;

/// The public sanitization operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Phone,
    Postal,
    Date,
    Email,
    Gender,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Self::Phone,
        Self::Postal,
        Self::Date,
        Self::Email,
        Self::Gender,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Postal => "postal",
            Self::Date => "date",
            Self::Email => "email",
            Self::Gender => "gender",
        }
    }

    /// Positional arguments accepted: the value plus an optional country
    /// (phone, postal) or output format (date).
    pub fn max_args(self) -> usize {
        match self {
            Self::Phone | Self::Postal | Self::Date => 2,
            Self::Email | Self::Gender => 1,
        }
    }
}

impl FromStr for Operation {
    type Err = SanitizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SanitizeError::UnknownOperation {
                name: wanted.to_string(),
            })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Gender label mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical gender value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Female,
    Male,
    Unknown,
}

/// Output codes for each [`Gender`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenderCodes {
    pub female: String,
    pub male: String,
    pub default: String,
}

impl Default for GenderCodes {
    fn default() -> Self {
        Self {
            female: "F".to_string(),
            male: "M".to_string(),
            default: "U".to_string(),
        }
    }
}

impl GenderCodes {
    pub fn code(&self, gender: Gender) -> &str {
        match gender {
            Gender::Female => &self.female,
            Gender::Male => &self.male,
            Gender::Unknown => &self.default,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(GenderCodes::default().code(*self))
    }
}

/// Case-insensitive dictionary lookup; unknown labels map to
/// [`Gender::Unknown`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GenderMapper;

impl GenderMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn map(&self, value: &str) -> Gender {
        match value.trim().to_lowercase().as_str() {
            "f" | "female" => Gender::Female,
            "m" | "male" => Gender::Male,
            _ => Gender::Unknown,
        }
    }
}

//! Input fixtures shared across test files.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// (input, country, expected) phone cases.
pub const PHONE_CASES: &[(&str, &str, &str)] = &[
    // AU: trunk prefix added to 9 digits
    ("412345678", "au", "0412345678"),
    ("2 9876 5432", "au", "0298765432"),
    // AU: country code replaced
    ("61412345678", "au", "0412345678"),
    ("+61 412 345 678", "au", "0412345678"),
    ("+61298765432", "au", "0298765432"),
    // AU: already national
    ("0412345678", "au", "0412345678"),
    ("04 1234 5678", "au", "0412345678"),
    // NZ: 8-digit landline
    ("21234567", "nz", "021234567"),
    ("9 123 4567", "nz", "091234567"),
    // NZ: mobile range
    ("211234567", "nz", "0211234567"),
    ("2112345678", "nz", "02112345678"),
    // NZ: country code
    ("6491234567", "nz", "091234567"),
    ("+64 9 123 4567", "nz", "091234567"),
    ("+64211234567", "nz", "0211234567"),
    ("642112345678", "nz", "02112345678"),
];

/// (input, country, expected) postal cases.
pub const POSTAL_CASES: &[(&str, &str, &str)] = &[
    ("7", "au", "0007"),
    ("42", "nz", "0042"),
    ("123", "au", "0123"),
    ("800", "nz", "0800"),
    ("1234", "au", "1234"),
    ("98765", "au", "98765"),
    ("2A", "au", "2A"),
];

/// Writes a JSON config file into `dir` and returns its path.
pub fn write_config(dir: &Path, json: &str) -> Result<PathBuf> {
    let path = dir.join("fieldsan.json");
    fs::write(&path, json)?;
    Ok(path)
}

//! Custom assertions for sanitizer testing.

use fieldsan::{SanitizeError, SanitizeResult, Sanitizer};

/// Asserts that an operation succeeded with `expected`.
///
/// # Panics
/// Panics with the input and error when the operation failed or produced
/// something else.
pub fn assert_sanitized(result: SanitizeResult<String>, input: &str, expected: &str) {
    match result {
        Ok(actual) => assert_eq!(
            actual, expected,
            "Input '{}' should sanitize to '{}' but gave '{}'",
            input, expected, actual
        ),
        Err(e) => panic!(
            "Input '{}' should sanitize to '{}' but failed: {}",
            input, expected, e
        ),
    }
}

/// Asserts that an operation failed and the session logged the failure.
pub fn assert_failed(
    sanitizer: &Sanitizer,
    result: SanitizeResult<String>,
    input: &str,
) -> SanitizeError {
    let err = match result {
        Ok(value) => panic!("Input '{}' should fail but gave '{}'", input, value),
        Err(e) => e,
    };
    assert_eq!(
        sanitizer.last_failed(),
        Some(true),
        "Failure for '{}' should be recorded in the session",
        input
    );
    err
}

/// Asserts that sanitizing an already-sanitized value changes nothing.
pub fn assert_idempotent<F>(mut op: F, input: &str)
where
    F: FnMut(&str) -> SanitizeResult<String>,
{
    let once = op(input).unwrap_or_else(|e| panic!("'{}' failed: {}", input, e));
    let twice = op(&once).unwrap_or_else(|e| panic!("'{}' failed on re-run: {}", once, e));
    assert_eq!(once, twice, "Sanitizing '{}' is not idempotent", input);
}

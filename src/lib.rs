//! Sanitization of loosely-formatted contact fields.
//!
//! This library brings user-entered values to a canonical form for storage
//! and matching. It is a best-effort sanitizer, not a validator: values it
//! has no rule for are passed through.
//!
//! # Features
//!
//! - **Phone numbers**: Australian and New Zealand national format
//! - **Postal codes**: zero-padded to four digits
//! - **Dates**: `/`, `-` or `.` separated, day-first then year-first
//! - **Email lists**: invalid addresses dropped, rejoined with `;`
//! - **Gender labels**: mapped to configurable codes
//!
//! # Architecture
//!
//! - [`rules`]: Ordered search/replace rule sets and the country tables
//! - [`domain`]: One normalizer per field kind
//! - [`service`]: The [`Sanitizer`] engine and its per-call session
//! - [`error`]: Tagged failures
//!
//! # Quick Start
//!
//! ```
//! use fieldsan::Sanitizer;
//!
//! let mut sanitizer = Sanitizer::new();
//!
//! assert_eq!(sanitizer.phone("+61 412 345 678", None)?, "0412345678");
//! assert_eq!(sanitizer.postal("800", Some("au"))?, "0800");
//! assert_eq!(sanitizer.date("25/12/2020", None)?, "2020-12-25");
//! assert_eq!(sanitizer.email("a@x.com, junk"), "a@x.com");
//! assert_eq!(sanitizer.gender("Female"), "F");
//! # Ok::<(), fieldsan::SanitizeError>(())
//! ```
//!
//! # Examples
//!
//! ## Custom rule set
//!
//! ```
//! use fieldsan::{FieldRecord, Sanitizer};
//!
//! let mut sanitizer = Sanitizer::new();
//! let record = FieldRecord {
//!     value: "(09) 555-0100".to_string(),
//!     search_pattern: Some(vec![r"[^0-9]".to_string()]),
//!     replace_pattern: Some(vec![String::new()]),
//!     ..Default::default()
//! };
//! assert_eq!(sanitizer.phone(record, None)?, "095550100");
//! # Ok::<(), fieldsan::SanitizeError>(())
//! ```
//!
//! ## Dispatch by name
//!
//! ```
//! use fieldsan::Sanitizer;
//!
//! let mut sanitizer = Sanitizer::new();
//! let out = sanitizer.invoke_named("date", &["2020.01.31", "%d/%m/%Y"])?;
//! assert_eq!(out, "31/01/2020");
//! # Ok::<(), fieldsan::SanitizeError>(())
//! ```

pub mod config;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod logging;
pub mod rules;
pub mod service;
pub mod session;

// Re-exports for convenient access
pub use config::SanitizerConfig;
pub use dispatch::Operation;
pub use domain::{
    DateNormalizer, EmailNormalizer, EmailValidator, FieldInput, FieldRecord, Gender,
    GenderCodes, GenderMapper, PhoneNormalizer, PostalNormalizer, SyntaxEmailValidator,
};
pub use error::{SanitizeError, SanitizeResult};
pub use rules::{Country, ReplaceEngine, RuleSet, RuleTable};
pub use service::Sanitizer;
pub use session::SanitizationSession;

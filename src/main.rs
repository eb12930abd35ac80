//! Field Sanitizer CLI Application.
//!
//! This binary provides a command-line interface for the fieldsan library.
//! The sanitized value is printed on stdout; failures go to stderr with a
//! non-zero exit status.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use fieldsan::logging::init_logging;
use fieldsan::{FieldInput, Sanitizer, SanitizerConfig};

/// Field Sanitizer
///
/// Normalize phone numbers, postal codes, dates, email lists and gender
/// labels into canonical form.
#[derive(Parser)]
#[command(name = "fieldsan")]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Country used when a command names none
    #[arg(long, value_name = "CC", global = true)]
    default_country: Option<String>,

    /// Fail on countries without a rule table instead of passing values through
    #[arg(long, global = true)]
    strict_country: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a phone number
    Phone {
        /// Raw phone number
        #[arg(required_unless_present = "record", allow_hyphen_values = true)]
        value: Option<String>,

        /// Two-letter country code (au, nz)
        #[arg(long, value_name = "CC")]
        country: Option<String>,

        /// JSON record with value, country, searchPattern, replacePattern
        #[arg(long, value_name = "JSON", conflicts_with = "value")]
        record: Option<String>,
    },

    /// Pad a postal code to four digits
    Postal {
        /// Raw postal code
        #[arg(required_unless_present = "record", allow_hyphen_values = true)]
        value: Option<String>,

        /// Two-letter country code (au, nz)
        #[arg(long, value_name = "CC")]
        country: Option<String>,

        /// JSON record with value, country, searchPattern, replacePattern
        #[arg(long, value_name = "JSON", conflicts_with = "value")]
        record: Option<String>,
    },

    /// Normalize a calendar date
    Date {
        /// Date such as 25/12/2020 or 2020-12-25
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// strftime output format (default %Y-%m-%d)
        #[arg(short, long, value_name = "FMT")]
        format: Option<String>,
    },

    /// Keep the valid addresses of a ; or , separated list
    Email {
        /// Address list
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Map a gender label to its code
    Gender {
        /// Free-text gender label
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Run an operation by name with positional arguments
    Invoke {
        /// Operation name (phone, postal, date, email, gender)
        operation: String,

        /// Value followed by the optional country or format
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

/// Command handler with dependency injection.
struct SanitizeHandler {
    sanitizer: Sanitizer,
}

impl SanitizeHandler {
    fn new(config: SanitizerConfig) -> Self {
        Self {
            sanitizer: Sanitizer::with_config(config),
        }
    }

    /// Executes one command and returns the text to print.
    fn run(&mut self, command: Commands) -> Result<String> {
        let output = match command {
            Commands::Phone {
                value,
                country,
                record,
            } => {
                let input = field_input(value, record)?;
                self.sanitizer
                    .phone(input, country.as_deref())
                    .context("Phone sanitization failed")?
            }
            Commands::Postal {
                value,
                country,
                record,
            } => {
                let input = field_input(value, record)?;
                self.sanitizer
                    .postal(input, country.as_deref())
                    .context("Postal sanitization failed")?
            }
            Commands::Date { value, format } => self
                .sanitizer
                .date(&value, format.as_deref())
                .context("Date sanitization failed")?,
            Commands::Email { value } => self.sanitizer.email(&value),
            Commands::Gender { value } => self.sanitizer.gender(&value),
            Commands::Invoke { operation, args } => {
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                self.sanitizer
                    .invoke_named(&operation, &args)
                    .with_context(|| format!("Operation '{}' failed", operation))?
            }
        };
        Ok(output)
    }
}

/// Builds the phone/postal input from either the positional value or the
/// `--record` JSON.
fn field_input(value: Option<String>, record: Option<String>) -> Result<FieldInput> {
    match (value, record) {
        (_, Some(json)) => FieldInput::from_json(&json).context("Invalid --record JSON"),
        (Some(value), None) => Ok(FieldInput::Value(value)),
        (None, None) => anyhow::bail!("A value or --record is required"),
    }
}

/// Loads the config file, then applies command-line overrides.
fn build_config(
    path: Option<&PathBuf>,
    default_country: Option<String>,
    strict_country: bool,
) -> Result<SanitizerConfig> {
    let mut config = match path {
        Some(path) => SanitizerConfig::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SanitizerConfig::default(),
    };

    if let Some(country) = default_country {
        config = config.with_default_country(country);
    }
    if strict_country {
        config = config.with_strict_country(true);
    }

    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = build_config(cli.config.as_ref(), cli.default_country, cli.strict_country)?;
    let mut handler = SanitizeHandler::new(config);

    let output = handler.run(cli.command)?;
    println!("{}", output);

    Ok(())
}

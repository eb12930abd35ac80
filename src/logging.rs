//! Logging setup for the command-line tool.
//!
//! Library code only emits `tracing` events; this installs the subscriber.
//! Output goes to stderr so stdout carries nothing but results.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Maps `-v` occurrences to a level: none → warn, one → debug, more → trace.
pub fn level_from_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the global fmt subscriber. `RUST_LOG` takes precedence over
/// `verbosity` when set. Calling twice is a no-op.
pub fn init_logging(verbosity: u8) {
    let level = level_from_verbosity(verbosity);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fieldsan={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

//! Logging initialization for the panel dashboard CLI.
//!
//! Configures the `tracing` subscriber with level filtering via the `PDASH_LOG`
//! environment variable. Falls back to the `[logging] level` from the config
//! file when the variable is unset. Records emitted by `panel-layout` through
//! the `log` facade are forwarded to the same subscriber.
//!
//! # Usage
//!
//! ```bash
//! # Configured level (info unless the config file says otherwise)
//! pdash columns
//!
//! # Debug level
//! PDASH_LOG=debug pdash columns
//!
//! # Module-specific filtering
//! PDASH_LOG=panel_layout=debug,warn pdash move news=0:0
//! ```

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "PDASH_LOG";

/// Builds the filter: `PDASH_LOG` if set and valid, otherwise `level`.
pub fn filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
}

/// Initialize the tracing subscriber, writing to stderr.
///
/// Stdout is reserved for command output. A second call is a no-op.
pub fn init(level: LogLevel) {
    let _ = fmt()
        .with_env_filter(filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

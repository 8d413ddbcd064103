//! TOML configuration schema types for the panel dashboard.
//!
//! All structs derive `Deserialize` and `Serialize` with sensible defaults via
//! `#[serde(default)]`, so a partial (or empty) file is always valid.

use panel_layout::{ColumnsCount, PanelDefinition};
use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// Corresponds to the full TOML file structure:
/// ```toml
/// [dashboard]
/// [storage]
/// [logging]
/// [[panels]]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Grid settings.
    pub dashboard: DashboardConfig,
    /// Where user panel records live.
    pub storage: StorageConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
    /// Panels registered in addition to the built-in ones.
    pub panels: Vec<PanelDefinition>,
}

impl Config {
    /// Checks cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the column settings are inconsistent
    /// or the default user is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dashboard = &self.dashboard;
        if dashboard.max_columns == 0 {
            return Err(ConfigError::Invalid {
                message: "dashboard.max_columns must be at least 1".to_string(),
            });
        }
        if dashboard.default_columns == 0 || dashboard.default_columns > dashboard.max_columns {
            return Err(ConfigError::Invalid {
                message: format!(
                    "dashboard.default_columns must be between 1 and {}",
                    dashboard.max_columns
                ),
            });
        }
        if self.storage.default_user.is_empty() {
            return Err(ConfigError::Invalid {
                message: "storage.default_user must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Dashboard grid configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Columns-count used when a command does not pass `--columns`.
    pub default_columns: ColumnsCount,
    /// Widest grid the dashboard renders.
    pub max_columns: ColumnsCount,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_columns: 3,
            max_columns: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// User record storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one JSON record per user.
    /// Empty string means `$XDG_DATA_HOME/panel-dashboard/users`.
    /// A leading `~` is expanded.
    pub data_dir: String,
    /// User identity used when a command does not pass `--user`.
    pub default_user: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: String::new(),
            default_user: "guest".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Logging configuration. `PDASH_LOG` overrides `level` when set.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Logging verbosity.
    pub level: LogLevel,
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    #[default]
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Filter directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

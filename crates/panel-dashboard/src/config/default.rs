//! Default configuration template and file creation utilities.
//!
//! Provides a well-commented TOML template that matches `Config::default()`
//! and a function to write it to the XDG config path (or any other path).

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A well-commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
/// Sections: `[dashboard]`, `[storage]`, `[logging]`, and a commented
/// `[[panels]]` example.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Panel Dashboard Configuration
#
# This file was auto-generated with default values.
# All values shown below are the built-in defaults.
#
# Location: $XDG_CONFIG_HOME/panel-dashboard/config.toml

# ==============================================================================
# Dashboard grid
# ==============================================================================

[dashboard]

# Columns-count used when a command is run without --columns.
# Every columns-count keeps its own independent layout per panel.
# Must be between 1 and max_columns.
default_columns = 3

# Widest grid the dashboard renders.
max_columns = 5

# ==============================================================================
# Storage
# ==============================================================================

[storage]

# Directory holding one JSON record per user.
# Empty string means $XDG_DATA_HOME/panel-dashboard/users.
# Tilde (~) is expanded to the user's home directory.
data_dir = ""

# User identity used when a command is run without --user.
# 1-30 characters: letters, digits and _ . @ + -
default_user = "guest"

# ==============================================================================
# Logging
# ==============================================================================

[logging]

# Logging verbosity level. The PDASH_LOG environment variable overrides it.
# Options: "error", "warn", "info", "debug", "trace"
level = "info"

# ==============================================================================
# Extra panels
# ==============================================================================
#
# Built-in panels: onlineusers, news, weather, events, map, traffic.
# Each [[panels]] entry registers one more panel type.
# `dependencies` lists panels that must be enabled together with this one.
#
# [[panels]]
# name = "radar"
# title = "Rain radar"
# dependencies = ["weather", "map"]
"#;

// ---------------------------------------------------------------------------
// File creation functions
// ---------------------------------------------------------------------------

/// Creates (or force-overwrites) the default config file.
///
/// Writes to `path`, or to `xdg::config_path()` when `path` is `None`.
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
/// - Returns the path where the config was written.
pub fn create_default_config(path: Option<&Path>, force: bool) -> Result<PathBuf, ConfigError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(xdg::config_path);

    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists { path });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(&path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(&path)?;
    tracing::info!("Created default configuration at {}", path.display());
    Ok(path)
}

/// Writes the default template to `path`, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_error)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Platform-aware path resolution for panel-dashboard.
//!
//! On **Linux**, follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/panel-dashboard` or `~/.config/panel-dashboard`
//! - Data: `$XDG_DATA_HOME/panel-dashboard` or `~/.local/share/panel-dashboard`
//!
//! On **macOS**, uses Apple conventions with XDG env var overrides:
//! - Config and data: `~/Library/Application Support/panel-dashboard`

use std::path::PathBuf;

const APP_NAME: &str = "panel-dashboard";

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the configuration directory for panel-dashboard.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/panel-dashboard` (if env var set, any platform)
/// 2. Platform default:
///    - Linux: `~/.config/panel-dashboard`
///    - macOS: `~/Library/Application Support/panel-dashboard`
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_config_dir().join(APP_NAME)
}

/// Platform-native config base directory (without XDG override).
fn platform_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::config_dir().unwrap_or_else(|| home_dir().join("Library/Application Support"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        home_dir().join(".config")
    }
}

/// Returns the path to the main configuration file.
///
/// Resolves to `config_dir()/config.toml`.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the data directory for panel-dashboard.
///
/// `$XDG_DATA_HOME/panel-dashboard` if set, otherwise the platform data
/// directory.
pub fn data_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    dirs::data_dir()
        .unwrap_or_else(|| home_dir().join(".local/share"))
        .join(APP_NAME)
}

/// Directory holding per-user panel records when the config leaves
/// `storage.data_dir` empty.
pub fn default_users_dir() -> PathBuf {
    data_dir().join("users")
}

/// Expands a leading `~` in a path string to the user's home directory.
///
/// If the path does not start with `~`, it is returned as-is.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else if path == "~" {
        home_dir()
    } else {
        PathBuf::from(path)
    }
}

//! Configuration file commands.
//!
//! These run before any config is loaded, so a broken file can still be
//! located, validated and replaced.

use panel_dashboard::config::{default, loader::ConfigLoader, xdg};
use panel_dashboard::{users_dir, AppError};
use std::path::Path;

use crate::ConfigAction;

/// Runs a `config` subcommand against `path`, or the XDG default.
pub(crate) fn run_config_command(action: ConfigAction, path: Option<&Path>) -> Result<(), AppError> {
    match action {
        ConfigAction::Init { force } => {
            let written = default::create_default_config(path, force)?;
            println!("Created configuration at {}", written.display());
        }
        ConfigAction::Path => {
            let resolved = path.map(Path::to_path_buf).unwrap_or_else(xdg::config_path);
            println!("{}", resolved.display());
        }
        ConfigAction::Validate => {
            let config = ConfigLoader::load(path)?;
            let registry = panel_dashboard::build_registry(&config.panels)?;
            println!("Configuration is valid");
            println!("  Default columns: {}", config.dashboard.default_columns);
            println!("  Max columns:     {}", config.dashboard.max_columns);
            println!("  Default user:    {}", config.storage.default_user);
            println!("  Records:         {}", users_dir(&config.storage).display());
            println!("  Panels:          {}", registry.len());
        }
    }
    Ok(())
}

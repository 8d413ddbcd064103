//! Request context shared by the CLI commands.
//!
//! One invocation of `pdash` is one request: the context resolves the user,
//! the panel registry and the record repository from the loaded config, then
//! runs a single store operation through [`panel_layout::update_user_panels`]
//! or a read-only [`PanelLayoutStore`].

use std::path::PathBuf;

use panel_layout::{
    load_user_store, update_user_panels, validate_user, ColumnsCount, JsonFileRepository,
    PanelDefinition, PanelLayoutStore, PanelRegistry,
};
use thiserror::Error;

use crate::config::error::ConfigError;
use crate::config::schema::{Config, StorageConfig};
use crate::config::xdg;

/// Errors surfaced by CLI commands.
#[derive(Error, Debug)]
pub enum AppError {
    /// Loading or writing the configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A layout, registry, form or storage operation failed.
    #[error(transparent)]
    Panels(#[from] panel_layout::Error),

    /// `--columns` is outside the range the dashboard renders.
    #[error("Columns-count {requested} is outside 1..={max}")]
    ColumnsOutOfRange {
        /// Requested columns-count.
        requested: ColumnsCount,
        /// `dashboard.max_columns` from the config.
        max: ColumnsCount,
    },

    /// Command output could not be serialized.
    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Builds the registry: built-in panels followed by the config's extras.
///
/// Extra panels without a title are titled after their name.
///
/// # Errors
///
/// Fails if an extra panel has an invalid name or shadows another panel.
pub fn build_registry(extra: &[PanelDefinition]) -> Result<PanelRegistry, panel_layout::Error> {
    let mut registry = PanelRegistry::builtin();
    for definition in extra {
        let mut definition = definition.clone();
        if definition.title.is_empty() {
            definition.title = definition.name.clone();
        }
        registry.register(definition)?;
    }
    for definition in registry.get_all_panels() {
        for dependency in &definition.dependencies {
            if !registry.panel_exists(dependency) {
                tracing::warn!(
                    "panel {} depends on unregistered panel {}",
                    definition.name,
                    dependency
                );
            }
        }
    }
    Ok(registry)
}

/// Directory holding the per-user records.
pub fn users_dir(storage: &StorageConfig) -> PathBuf {
    if storage.data_dir.is_empty() {
        xdg::default_users_dir()
    } else {
        xdg::expand_tilde(&storage.data_dir)
    }
}

/// Everything one command needs to serve one user.
#[derive(Debug)]
pub struct AppContext {
    /// Loaded configuration.
    pub config: Config,
    /// Built-in and configured panels.
    pub registry: PanelRegistry,
    /// Record storage.
    pub repository: JsonFileRepository,
    /// Identity the request runs as.
    pub user: String,
}

impl AppContext {
    /// Resolves the context for `user`, or the configured default user.
    pub fn new(config: Config, user: Option<String>) -> Result<Self, AppError> {
        let user = user.unwrap_or_else(|| config.storage.default_user.clone());
        validate_user(&user).map_err(panel_layout::Error::from)?;
        let registry = build_registry(&config.panels)?;
        let repository = JsonFileRepository::new(users_dir(&config.storage));
        tracing::debug!(
            "serving user {} from {}",
            user,
            repository.dir().display()
        );
        Ok(Self {
            config,
            registry,
            repository,
            user,
        })
    }

    /// Resolves `--columns`, defaulting to `dashboard.default_columns`.
    pub fn columns(&self, requested: Option<ColumnsCount>) -> Result<ColumnsCount, AppError> {
        let max = self.config.dashboard.max_columns;
        let columns = requested.unwrap_or(self.config.dashboard.default_columns);
        if columns == 0 || columns > max {
            return Err(AppError::ColumnsOutOfRange {
                requested: columns,
                max,
            });
        }
        Ok(columns)
    }

    /// Read-only view of the user's panels.
    pub fn store(&self) -> Result<PanelLayoutStore<'_>, AppError> {
        Ok(load_user_store(&self.repository, &self.registry, &self.user)?)
    }

    /// Runs one write request and persists it if `f` succeeds.
    pub fn update<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut PanelLayoutStore<'_>) -> panel_layout::Result<T>,
    {
        Ok(update_user_panels(
            &self.repository,
            &self.registry,
            &self.user,
            f,
        )?)
    }
}

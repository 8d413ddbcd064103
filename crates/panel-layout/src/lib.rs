//! Per-user dashboard panel layout bookkeeping
//!
//! This crate tracks which dashboard panels a user has enabled and, for every
//! columns-count the dashboard is rendered with, where each panel sits and
//! whether it is collapsed.
//!
//! - [`PanelRegistry`]: catalog of panel types, built once and passed by reference
//! - [`PanelLayoutStore`]: read and write API over one user's [`UserPanelSet`]
//! - [`PanelSelectionForm`]: settings form with dependency checks
//! - [`PanelSetRepository`]: persistence keyed by user identity
//!
//! # Examples
//!
//! ```
//! use panel_layout::{MemoryRepository, PanelRegistry, update_user_panels};
//! use std::collections::BTreeMap;
//!
//! let registry = PanelRegistry::builtin();
//! let repository = MemoryRepository::new();
//!
//! let columns = update_user_panels(&repository, &registry, "alice", |store| {
//!     store.set_panels(["news", "weather"]);
//!     let ordering = BTreeMap::from([
//!         ("weather".to_string(), (0, 1)),
//!         ("news".to_string(), (0, 0)),
//!     ]);
//!     store.reorder_panels(3, &ordering)?;
//!     store.get_columns(3)
//! })
//! .unwrap();
//!
//! assert_eq!(columns, vec![vec!["news".to_string(), "weather".to_string()]]);
//! ```

#![warn(missing_docs)]

mod error;
mod form;
mod registry;
mod repository;
mod store;
mod types;

// Re-export all public types
pub use error::{Error, FormError, LayoutError, RegistryError, Result, StorageError};
pub use form::{forced_by, PanelField, PanelSelectionForm};
pub use registry::{PanelDefinition, PanelRegistry};
pub use repository::{
    load_or_default, validate_user, JsonFileRepository, MemoryRepository, PanelSetRepository,
};
pub use store::{PanelLayoutStore, Position};
pub use types::{ColumnsCount, Panel, PanelLayoutState, PanelRecord, UserPanelSet, SCHEMA_VERSION};

/// Run one request against a user's panels and persist the result.
///
/// Loads the user's panel set (every registered panel for a new user), hands
/// a [`PanelLayoutStore`] to `f`, and saves the set if `f` succeeds. Nothing
/// is saved when `f` returns an error.
///
/// # Errors
/// * `StorageError` - Failed to load or save the record
/// * Any error returned by `f`
pub fn update_user_panels<R, T, F>(
    repository: &R,
    registry: &PanelRegistry,
    user: &str,
    f: F,
) -> Result<T>
where
    R: PanelSetRepository + ?Sized,
    F: FnOnce(&mut PanelLayoutStore<'_>) -> Result<T>,
{
    let panels = load_or_default(repository, user, registry)?;
    let mut store = PanelLayoutStore::new(registry, panels);
    let output = f(&mut store)?;
    repository.save(user, store.panels())?;
    Ok(output)
}

/// Load a read-only view of a user's panels.
///
/// # Errors
/// * `StorageError` - Failed to load the record
pub fn load_user_store<'r, R>(
    repository: &R,
    registry: &'r PanelRegistry,
    user: &str,
) -> Result<PanelLayoutStore<'r>>
where
    R: PanelSetRepository + ?Sized,
{
    let panels = load_or_default(repository, user, registry)?;
    Ok(PanelLayoutStore::new(registry, panels))
}

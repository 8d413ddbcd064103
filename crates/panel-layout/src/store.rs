//! Per-user panel layout store
//!
//! [`PanelLayoutStore`] wraps a user's [`UserPanelSet`] together with the
//! [`PanelRegistry`] and exposes the read side used to render the dashboard
//! grid (`get_all_layouts`, `get_collapsed_map`, `get_columns`) and the write
//! side used by the settings handlers (`set_panels`, `set_collapsed`,
//! `reorder_panels`).
//!
//! Layout state is stored independently per columns-count. Missing state is
//! never an error: it resolves to [`PanelLayoutState::default`].

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{LayoutError, Result};
use crate::registry::{PanelDefinition, PanelRegistry};
use crate::types::{ColumnsCount, Panel, PanelLayoutState, UserPanelSet};

/// Requested `(column, order)` position of a panel.
pub type Position = (i32, i32);

/// Layout store for one user's panels
#[derive(Debug, Clone)]
pub struct PanelLayoutStore<'r> {
    registry: &'r PanelRegistry,
    panels: UserPanelSet,
}

impl<'r> PanelLayoutStore<'r> {
    /// Creates a store over a loaded panel set.
    pub fn new(registry: &'r PanelRegistry, panels: UserPanelSet) -> Self {
        Self { registry, panels }
    }

    /// The registry this store resolves panel names against.
    pub fn registry(&self) -> &'r PanelRegistry {
        self.registry
    }

    /// The underlying panel set, for persistence.
    pub fn panels(&self) -> &UserPanelSet {
        &self.panels
    }

    /// Consumes the store, returning the panel set.
    pub fn into_panels(self) -> UserPanelSet {
        self.panels
    }

    /// Returns `true` if `name` is enabled for this user.
    pub fn has_panel(&self, name: &str) -> bool {
        self.panels.contains(name)
    }

    /// Registry definitions of the enabled panels.
    ///
    /// Enabled names the registry no longer knows are skipped.
    pub fn enabled_panels(&self) -> Vec<&'r PanelDefinition> {
        let registry = self.registry;
        self.panels
            .names()
            .filter_map(|name| registry.get_panel(name).ok())
            .collect()
    }

    /// Layout of `panel_name` at `columns_count`, or all defaults.
    pub fn get_layout(&self, panel_name: &str, columns_count: ColumnsCount) -> PanelLayoutState {
        self.panels
            .panels
            .get(panel_name)
            .map(|panel| panel.layout(columns_count))
            .unwrap_or_default()
    }

    /// Layout of every enabled panel at `columns_count`.
    pub fn get_all_layouts(
        &self,
        columns_count: ColumnsCount,
    ) -> BTreeMap<String, PanelLayoutState> {
        self.panels
            .panels
            .iter()
            .map(|(name, panel)| (name.clone(), panel.layout(columns_count)))
            .collect()
    }

    /// Collapsed flag of every enabled panel at `columns_count`.
    pub fn get_collapsed_map(&self, columns_count: ColumnsCount) -> BTreeMap<String, bool> {
        self.get_all_layouts(columns_count)
            .into_iter()
            .map(|(name, layout)| (name, layout.collapsed))
            .collect()
    }

    /// Collapse or expand an enabled panel at `columns_count`.
    ///
    /// Column and order are kept if the panel already had state at this
    /// columns-count.
    ///
    /// # Errors
    ///
    /// - `LayoutError::InvalidColumnsCount` if `columns_count` is zero
    /// - `LayoutError::PanelNotEnabled` if the panel is not enabled; no state
    ///   is created in that case
    pub fn set_collapsed(
        &mut self,
        columns_count: ColumnsCount,
        panel_name: &str,
        collapsed: bool,
    ) -> Result<()> {
        check_columns_count(columns_count)?;
        let panel = self
            .panels
            .panels
            .get_mut(panel_name)
            .ok_or_else(|| LayoutError::PanelNotEnabled(panel_name.to_string()))?;
        panel.layout_mut(columns_count).collapsed = collapsed;
        log::debug!(
            "panel {} collapsed={} at {} columns",
            panel_name,
            collapsed,
            columns_count
        );
        Ok(())
    }

    /// Rendered column layout at `columns_count`.
    ///
    /// Positioned panels are sorted by `(column, order)` and grouped into one
    /// list per column, indexed by column number. Columns without panels
    /// below the highest populated one are empty lists. Panels without a
    /// column, and enabled panels the registry no longer knows, are left out.
    ///
    /// # Errors
    ///
    /// - `LayoutError::InvalidColumnsCount` if `columns_count` is zero
    /// - `LayoutError::NegativeColumn` / `LayoutError::ColumnOutOfRange` if a
    ///   stored column does not fit the grid
    pub fn get_columns(&self, columns_count: ColumnsCount) -> Result<Vec<Vec<String>>> {
        check_columns_count(columns_count)?;

        let mut positioned: Vec<(usize, Option<i32>, &str)> = Vec::new();
        for (name, panel) in self.rendered_panels() {
            let layout = panel.layout(columns_count);
            let Some(column) = layout.column else {
                continue;
            };
            let index = check_column(name, column, columns_count)?;
            positioned.push((index, layout.order, name.as_str()));
        }

        // Stable: equal keys keep name order.
        positioned.sort_by_key(|&(column, order, _)| (column, order));

        let width = positioned
            .last()
            .map(|&(column, _, _)| column + 1)
            .unwrap_or(0);
        let mut columns: Vec<Vec<String>> = vec![Vec::new(); width];
        for (column, _, name) in positioned {
            columns[column].push(name.to_string());
        }
        Ok(columns)
    }

    /// Enabled panels without a column at `columns_count`.
    ///
    /// These are the panels a renderer appends after [`get_columns`](Self::get_columns).
    pub fn unpositioned_panels(&self, columns_count: ColumnsCount) -> Vec<String> {
        self.rendered_panels()
            .into_iter()
            .filter(|(_, panel)| panel.layout(columns_count).column.is_none())
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Reconcile the enabled set to exactly `names`.
    ///
    /// Panels missing from `names` are removed with all their state, new
    /// names get a fresh [`Panel`], and panels present in both keep their
    /// state untouched.
    pub fn set_panels<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();

        let before = self.panels.len();
        self.panels.panels.retain(|name, _| names.contains(name));
        let removed = before - self.panels.len();

        let mut added = 0usize;
        for name in names {
            if !self.panels.panels.contains_key(&name) {
                self.panels.panels.insert(name, Panel::default());
                added += 1;
            }
        }
        log::debug!("set_panels: {} added, {} removed", added, removed);
    }

    /// Move enabled panels to new `(column, order)` positions at `columns_count`.
    ///
    /// Collapsed flags are kept. Names in `ordering` that are not enabled are
    /// ignored. Positions are checked before anything is written, so a
    /// rejected call leaves the layout unchanged.
    ///
    /// # Errors
    ///
    /// - `LayoutError::InvalidColumnsCount` if `columns_count` is zero
    /// - `LayoutError::NegativeColumn` / `LayoutError::ColumnOutOfRange` if a
    ///   requested column for an enabled panel does not fit the grid
    pub fn reorder_panels(
        &mut self,
        columns_count: ColumnsCount,
        ordering: &BTreeMap<String, Position>,
    ) -> Result<()> {
        check_columns_count(columns_count)?;

        for (name, &(column, _)) in ordering {
            if self.panels.contains(name) {
                check_column(name, column, columns_count)?;
            }
        }

        for (name, &(column, order)) in ordering {
            match self.panels.panels.get_mut(name) {
                Some(panel) => {
                    let layout = panel.layout_mut(columns_count);
                    layout.column = Some(column);
                    layout.order = Some(order);
                }
                None => log::debug!("reorder ignores disabled panel {}", name),
            }
        }
        Ok(())
    }

    /// Enabled panels the registry still recognizes.
    fn rendered_panels(&self) -> Vec<(&String, &Panel)> {
        self.panels
            .panels
            .iter()
            .filter(|(name, _)| {
                let known = self.registry.panel_exists(name);
                if !known {
                    log::debug!("skipping unregistered panel {}", name);
                }
                known
            })
            .collect()
    }
}

fn check_columns_count(columns_count: ColumnsCount) -> std::result::Result<(), LayoutError> {
    if columns_count == 0 {
        return Err(LayoutError::InvalidColumnsCount(columns_count));
    }
    Ok(())
}

/// Validates `column` against the grid width, returning it as an index.
fn check_column(
    panel: &str,
    column: i32,
    columns_count: ColumnsCount,
) -> std::result::Result<usize, LayoutError> {
    let index = usize::try_from(column).map_err(|_| LayoutError::NegativeColumn {
        panel: panel.to_string(),
        column,
        columns_count,
    })?;
    if index >= columns_count as usize {
        return Err(LayoutError::ColumnOutOfRange {
            panel: panel.to_string(),
            column,
            columns_count,
        });
    }
    Ok(index)
}

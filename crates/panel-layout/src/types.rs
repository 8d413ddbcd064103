//! Core domain types for panel-layout
//!
//! This module defines the per-user layout model: PanelLayoutState,
//! Panel, UserPanelSet, and the persisted PanelRecord envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::registry::PanelRegistry;

/// Number of grid columns the dashboard is rendered with.
pub type ColumnsCount = u32;

/// Current on-disk schema of [`PanelRecord`].
pub const SCHEMA_VERSION: u32 = 1;

/// Layout of one panel at one columns-count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelLayoutState {
    /// Whether the panel is rendered collapsed
    pub collapsed: bool,
    /// Grid column index (None: not positioned)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<i32>,
    /// Sort key within the column (None: unordered)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl PanelLayoutState {
    /// State with the given position and `collapsed = false`.
    pub fn positioned(column: i32, order: i32) -> Self {
        Self {
            collapsed: false,
            column: Some(column),
            order: Some(order),
        }
    }
}

/// An enabled panel and its stored layouts, keyed by columns-count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Panel {
    /// Independently stored layout per columns-count
    pub layouts: BTreeMap<ColumnsCount, PanelLayoutState>,
}

impl Panel {
    /// Stored layout at `columns_count`, or all defaults.
    pub fn layout(&self, columns_count: ColumnsCount) -> PanelLayoutState {
        self.layouts
            .get(&columns_count)
            .copied()
            .unwrap_or_default()
    }

    /// Mutable layout at `columns_count`, created with defaults if absent.
    pub fn layout_mut(&mut self, columns_count: ColumnsCount) -> &mut PanelLayoutState {
        self.layouts.entry(columns_count).or_default()
    }
}

/// The set of panels a user has enabled
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPanelSet {
    /// Enabled panels by name
    pub panels: BTreeMap<String, Panel>,
}

impl UserPanelSet {
    /// Creates an empty panel set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a panel set with every registered panel enabled.
    ///
    /// Used for users that have never saved panel preferences.
    pub fn with_all_panels(registry: &PanelRegistry) -> Self {
        let panels = registry
            .get_all_panel_names()
            .into_iter()
            .map(|name| (name, Panel::default()))
            .collect();
        Self { panels }
    }

    /// Returns `true` if `name` is enabled.
    pub fn contains(&self, name: &str) -> bool {
        self.panels.contains_key(name)
    }

    /// Enabled panel names in lookup order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.panels.keys().map(String::as_str)
    }

    /// Number of enabled panels.
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Returns `true` if no panel is enabled.
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

/// Persisted envelope of a user's panel set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRecord {
    /// Record schema version
    pub schema_version: u32,
    /// User identity the record belongs to
    pub user: String,
    /// Time of the last save
    pub updated_at: DateTime<Utc>,
    /// The user's panels
    pub panels: UserPanelSet,
}

impl PanelRecord {
    /// Wraps `panels` for `user`, stamped with the current time.
    pub fn new(user: &str, panels: UserPanelSet) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            user: user.to_string(),
            updated_at: Utc::now(),
            panels,
        }
    }
}

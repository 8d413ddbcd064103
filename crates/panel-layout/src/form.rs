//! Panel selection form
//!
//! Builds one field per registered panel for the "choose your panels"
//! settings page and cleans the submitted selection before it is handed to
//! [`PanelLayoutStore::set_panels`](crate::PanelLayoutStore::set_panels).
//!
//! A panel that other enabled panels depend on is *locked*: the page shows
//! it checked and disabled, listing the panels that force it on.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{FormError, Result};
use crate::registry::PanelRegistry;
use crate::types::UserPanelSet;

/// One checkbox of the selection form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelField {
    /// Panel name, used as the field name
    pub name: String,
    /// Label shown next to the checkbox
    pub title: String,
    /// Whether the panel is currently enabled
    pub enabled: bool,
    /// Enabled panels that require this one, directly or transitively
    pub locked_by: Vec<String>,
}

impl PanelField {
    /// Returns `true` if enabled dependents keep this panel switched on.
    pub fn is_locked(&self) -> bool {
        !self.locked_by.is_empty()
    }
}

/// Selection form over every registered panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSelectionForm {
    /// Fields ordered by panel name
    pub fields: Vec<PanelField>,
}

impl PanelSelectionForm {
    /// Builds the form for a user's current selection.
    pub fn build(registry: &PanelRegistry, panels: &UserPanelSet) -> Self {
        let enabled: BTreeSet<String> = panels
            .names()
            .filter(|name| registry.panel_exists(name))
            .map(str::to_string)
            .collect();
        let mut locks = forced_by(registry, &enabled);

        let fields = registry
            .get_all_panels()
            .map(|def| PanelField {
                name: def.name.clone(),
                title: def.title.clone(),
                enabled: enabled.contains(&def.name),
                locked_by: locks
                    .remove(&def.name)
                    .map(|set| set.into_iter().collect())
                    .unwrap_or_default(),
            })
            .collect();
        Self { fields }
    }

    /// Looks up the field for `name`.
    pub fn field(&self, name: &str) -> Option<&PanelField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Cleans a submitted selection into the set of panels to enable.
    ///
    /// Names the registry does not know are dropped.
    ///
    /// # Errors
    ///
    /// Returns `FormError::DependenciesNotSatisfied` for the first enabled
    /// panel (by name) whose dependencies are not all enabled.
    pub fn clean(
        registry: &PanelRegistry,
        submitted: &BTreeMap<String, bool>,
    ) -> Result<BTreeSet<String>> {
        let mut selected = BTreeSet::new();
        for (name, &enabled) in submitted {
            let Ok(definition) = registry.get_panel(name) else {
                log::warn!("dropping unregistered panel {} from selection", name);
                continue;
            };
            if !enabled {
                continue;
            }

            let missing: Vec<String> = definition
                .dependencies
                .iter()
                .filter(|dep| {
                    !(registry.panel_exists(dep) && submitted.get(*dep).copied().unwrap_or(false))
                })
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(FormError::DependenciesNotSatisfied {
                    panel: name.clone(),
                    missing,
                }
                .into());
            }
            selected.insert(name.clone());
        }
        Ok(selected)
    }
}

/// Maps each dependency to the enabled panels that force it on.
///
/// Dependencies are followed transitively; cycles are tolerated.
pub fn forced_by(
    registry: &PanelRegistry,
    enabled: &BTreeSet<String>,
) -> BTreeMap<String, BTreeSet<String>> {
    let mut locks: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for panel in enabled {
        let mut seen = BTreeSet::new();
        let mut pending = vec![panel.clone()];
        while let Some(current) = pending.pop() {
            let Ok(definition) = registry.get_panel(&current) else {
                continue;
            };
            for dep in &definition.dependencies {
                if dep != panel && seen.insert(dep.clone()) {
                    locks.entry(dep.clone()).or_default().insert(panel.clone());
                    pending.push(dep.clone());
                }
            }
        }
    }
    locks
}

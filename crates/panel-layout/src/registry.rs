//! Catalog of panel types known to the application
//!
//! The registry maps panel names to their definitions. It is built once at
//! startup and passed by reference to anything that needs panel metadata.

use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Definition of a panel type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelDefinition {
    /// Unique panel name, used as the key in user records
    pub name: String,
    /// Human-readable title
    #[serde(default)]
    pub title: String,
    /// Panels that must be enabled whenever this one is
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl PanelDefinition {
    /// Creates a definition titled after its name, without dependencies.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            title: name.to_string(),
            dependencies: Vec::new(),
        }
    }

    /// Sets the human-readable title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Adds a dependency on another panel.
    pub fn depends_on(mut self, dependency: &str) -> Self {
        self.dependencies.push(dependency.to_string());
        self
    }
}

/// Registry of panel definitions keyed by name
#[derive(Debug, Clone, Default)]
pub struct PanelRegistry {
    panels: BTreeMap<String, PanelDefinition>,
}

impl PanelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in panels.
    ///
    /// - `onlineusers`: users currently connected
    /// - `news`: latest news headlines
    /// - `weather`: local forecast
    /// - `events`: upcoming events
    /// - `map`: city map
    /// - `traffic`: traffic overlay, requires `map`
    pub fn builtin() -> Self {
        let builtin = [
            PanelDefinition::new("onlineusers").with_title("Online users"),
            PanelDefinition::new("news").with_title("News"),
            PanelDefinition::new("weather").with_title("Weather"),
            PanelDefinition::new("events").with_title("Events"),
            PanelDefinition::new("map").with_title("Map"),
            PanelDefinition::new("traffic")
                .with_title("Traffic")
                .depends_on("map"),
        ];
        let panels = builtin
            .into_iter()
            .map(|def| (def.name.clone(), def))
            .collect();
        Self { panels }
    }

    /// Register a panel definition.
    ///
    /// # Errors
    ///
    /// - `RegistryError::InvalidName` if the name is empty or contains whitespace
    /// - `RegistryError::AlreadyRegistered` if the name is taken
    pub fn register(&mut self, definition: PanelDefinition) -> Result<()> {
        let name = definition.name.clone();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(RegistryError::InvalidName(name).into());
        }
        if self.panels.contains_key(&name) {
            return Err(RegistryError::AlreadyRegistered(name).into());
        }
        log::debug!("registered panel {}", name);
        self.panels.insert(name, definition);
        Ok(())
    }

    /// Look up a panel definition.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotRegistered` for unknown names.
    pub fn get_panel(&self, name: &str) -> Result<&PanelDefinition> {
        self.panels
            .get(name)
            .ok_or_else(|| RegistryError::NotRegistered(name.to_string()).into())
    }

    /// Returns `true` if a panel with this name is registered.
    pub fn panel_exists(&self, name: &str) -> bool {
        self.panels.contains_key(name)
    }

    /// Names of all registered panels.
    pub fn get_all_panel_names(&self) -> BTreeSet<String> {
        self.panels.keys().cloned().collect()
    }

    /// All registered definitions, ordered by name.
    pub fn get_all_panels(&self) -> impl Iterator<Item = &PanelDefinition> {
        self.panels.values()
    }

    /// Number of registered panels.
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_builtin_registry_contents() {
        let registry = PanelRegistry::builtin();
        let names: Vec<String> = registry.get_all_panel_names().into_iter().collect();
        assert_eq!(
            names,
            vec!["events", "map", "news", "onlineusers", "traffic", "weather"]
        );
        let traffic = registry.get_panel("traffic").expect("traffic is builtin");
        assert_eq!(traffic.dependencies, vec!["map"]);
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = PanelRegistry::new();
        assert!(registry.is_empty());
        registry
            .register(PanelDefinition::new("horoscope").with_title("Horoscope"))
            .expect("register should succeed");
        assert!(registry.panel_exists("horoscope"));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get_panel("horoscope").expect("registered").title,
            "Horoscope"
        );
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut registry = PanelRegistry::builtin();
        let err = registry
            .register(PanelDefinition::new("news"))
            .expect_err("duplicate should fail");
        assert!(matches!(
            err,
            Error::Registry(RegistryError::AlreadyRegistered(ref name)) if name == "news"
        ));
    }

    #[test]
    fn test_register_invalid_name_fails() {
        let mut registry = PanelRegistry::new();
        for name in ["", "two words"] {
            let err = registry
                .register(PanelDefinition::new(name))
                .expect_err("invalid name should fail");
            assert!(matches!(err, Error::Registry(RegistryError::InvalidName(_))));
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_get_unknown_panel_fails() {
        let registry = PanelRegistry::builtin();
        let err = registry.get_panel("stocks").expect_err("unknown panel");
        assert!(matches!(
            err,
            Error::Registry(RegistryError::NotRegistered(ref name)) if name == "stocks"
        ));
        assert!(!registry.panel_exists("stocks"));
    }

    #[test]
    fn test_definition_builder() {
        let def = PanelDefinition::new("traffic")
            .with_title("Traffic")
            .depends_on("map")
            .depends_on("weather");
        assert_eq!(def.title, "Traffic");
        assert_eq!(def.dependencies, vec!["map", "weather"]);
    }
}

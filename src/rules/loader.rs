// SPDX-License-Identifier: MIT

//! Config loader - YAML/JSON file loading and parsing

use super::types::{ExtendedLogic, PanelConfig};
use crate::error::{DisplayLogicError, Result};
use std::fs;
use std::path::Path;

/// Loads panel configuration and extended conditional logic
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a panel configuration from a YAML (or JSON) file
    pub fn load_config<P: AsRef<Path>>(&self, path: P) -> Result<PanelConfig> {
        let content = fs::read_to_string(path)?;
        Self::parse_yaml(&content)
    }

    /// Parse a panel configuration from a YAML string
    pub fn parse_yaml(content: &str) -> Result<PanelConfig> {
        let config: PanelConfig = serde_yaml::from_str(content)?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load a bare logic-type → declarations document, as supplied by the page
    pub fn load_extended_logic<P: AsRef<Path>>(&self, path: P) -> Result<ExtendedLogic> {
        let content = fs::read_to_string(path)?;
        Self::parse_extended_logic(&content)
    }

    pub fn parse_extended_logic(content: &str) -> Result<ExtendedLogic> {
        let logic: ExtendedLogic = serde_json::from_str(content)?;
        Ok(logic)
    }

    fn validate(config: &PanelConfig) -> Result<()> {
        if config.events.is_empty() {
            return Err(DisplayLogicError::config(
                "at least one event kind must be subscribed",
            ));
        }
        if let Some(group) = config.groups.iter().find(|g| g.siblings.is_empty()) {
            return Err(DisplayLogicError::config(format!(
                "group '{}' has no siblings",
                group.suffix
            )));
        }
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

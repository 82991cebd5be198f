// SPDX-License-Identifier: MIT

//! Configuration types for rule construction
//!
//! These mirror the documents a hosting page supplies: a mapping from
//! logic-type tag to dependency declarations, optional extra control groups,
//! and the session's event settings.

use crate::logic::AnchorLogic;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Quiet interval before a debounced reconcile pass
pub const DEFAULT_QUIET_PERIOD_MS: u64 = 200;

/// Comparison value as written in configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Number(n) => write!(f, "{}", n),
            ConfigValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::Text(s.to_string())
    }
}

/// One explicit dependency: show or hide `target` based on `setting`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Declaration {
    /// Selector of the control(s) to toggle
    pub target: String,
    /// Selector of the driver control
    pub setting: String,
    /// One of `==`, `===`, `!=`, `!==`, `<`, `<=`, `>`, `>=`
    pub comparison: String,
    pub value: ConfigValue,
}

impl Declaration {
    pub fn new(target: &str, setting: &str, comparison: &str, value: impl Into<ConfigValue>) -> Self {
        Self {
            target: target.to_string(),
            setting: setting.to_string(),
            comparison: comparison.to_string(),
            value: value.into(),
        }
    }
}

/// Logic-type tag to declarations, in the order they were written
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtendedLogic {
    entries: Vec<(String, Vec<Declaration>)>,
}

impl ExtendedLogic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, logic_type: &str, declaration: Declaration) {
        match self.entries.iter_mut().find(|(tag, _)| tag == logic_type) {
            Some((_, declarations)) => declarations.push(declaration),
            None => self
                .entries
                .push((logic_type.to_string(), vec![declaration])),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Declaration])> {
        self.entries
            .iter()
            .map(|(tag, decls)| (tag.as_str(), decls.as_slice()))
    }

    /// Total number of declarations across all logic types
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, d)| d.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'de> Deserialize<'de> for ExtendedLogic {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ExtendedLogicVisitor;

        impl<'de> Visitor<'de> for ExtendedLogicVisitor {
            type Value = ExtendedLogic;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of logic type to a list of declarations")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut logic = ExtendedLogic::new();
                while let Some((tag, declarations)) =
                    map.next_entry::<String, Vec<Declaration>>()?
                {
                    for declaration in declarations {
                        logic.push(&tag, declaration);
                    }
                }
                Ok(logic)
            }
        }

        deserializer.deserialize_map(ExtendedLogicVisitor)
    }
}

impl Serialize for ExtendedLogic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(tag, decls)| (tag, decls)))
    }
}

/// A family of sibling controls governed by an anchor control
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GroupSpec {
    /// Selector narrowing which controls may act as anchors
    pub selector: String,
    /// Identifier suffix that marks an anchor
    pub suffix: String,
    pub logic: AnchorLogic,
    /// Suffixes appended to the anchor's base identifier; `""` is the base control itself
    pub siblings: Vec<String>,
}

impl GroupSpec {
    pub fn new(selector: &str, suffix: &str, logic: AnchorLogic, siblings: &[&str]) -> Self {
        Self {
            selector: selector.to_string(),
            suffix: suffix.to_string(),
            logic,
            siblings: siblings.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn default_quiet_period_ms() -> u64 {
    DEFAULT_QUIET_PERIOD_MS
}

fn default_events() -> Vec<String> {
    vec!["change".to_string(), "ready".to_string()]
}

fn default_true() -> bool {
    true
}

/// Everything a panel session is configured with
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PanelConfig {
    #[serde(default = "default_quiet_period_ms")]
    pub quiet_period_ms: u64,
    /// Host notification kinds that trigger a reconcile pass.
    ///
    /// Omitted means `change` and `ready`. An explicit empty list is rejected
    /// by `ConfigLoader`, since such a panel would never re-reconcile after
    /// startup. A session built from an in-code config with no events simply
    /// ignores every notification.
    #[serde(default = "default_events")]
    pub events: Vec<String>,
    /// Include the standard background, border and inherit groups
    #[serde(default = "default_true")]
    pub builtin_groups: bool,
    #[serde(default)]
    pub groups: Vec<GroupSpec>,
    #[serde(default)]
    pub conditional_logic: ExtendedLogic,
}

impl PanelConfig {
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: DEFAULT_QUIET_PERIOD_MS,
            events: default_events(),
            builtin_groups: true,
            groups: Vec::new(),
            conditional_logic: ExtendedLogic::new(),
        }
    }
}

// SPDX-License-Identifier: MIT

//! In-memory panel
//!
//! A flat, ordered list of controls that answers the [`Panel`] probes and
//! records every toggle it receives. Fixtures are plain YAML documents.

use super::{ControlHandle, Panel};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A selectable entry inside a control (radio option or labelled checkbox)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ControlItem {
    pub value: String,
    #[serde(default)]
    pub checked: bool,
}

/// One control container as rendered by the host
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Control {
    pub id: String,
    #[serde(default)]
    pub classes: Vec<String>,
    /// Current value of the control's input, select or textarea
    #[serde(default)]
    pub value: Option<String>,
    /// Checked state of the control's first input
    #[serde(default)]
    pub checked: bool,
    /// Whether a selected-image thumbnail is present
    #[serde(default)]
    pub thumbnail: bool,
    #[serde(default)]
    pub items: Vec<ControlItem>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Control {
    pub fn new(id: impl Into<String>, classes: &[&str]) -> Self {
        Self {
            id: id.into(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            value: None,
            checked: false,
            thumbnail: false,
            items: Vec::new(),
            visible: true,
        }
    }

    pub fn checkbox(id: impl Into<String>, checked: bool) -> Self {
        let mut control = Self::new(id, &["customize-control", "customize-control-checkbox"]);
        control.checked = checked;
        control
    }

    pub fn image(id: impl Into<String>, thumbnail: bool) -> Self {
        let mut control = Self::new(id, &["customize-control", "customize-control-image"]);
        control.thumbnail = thumbnail;
        control
    }

    pub fn text(id: impl Into<String>, value: &str) -> Self {
        Self::new(id, &["customize-control", "customize-control-text"]).with_value(value)
    }

    pub fn select(id: impl Into<String>, value: &str) -> Self {
        Self::new(id, &["customize-control", "customize-control-select"]).with_value(value)
    }

    pub fn textarea(id: impl Into<String>, value: &str) -> Self {
        Self::new(id, &["customize-control", "customize-control-textarea"]).with_value(value)
    }

    /// A radio group; `checked` names the selected option, if any
    pub fn radio(id: impl Into<String>, options: &[&str], checked: Option<&str>) -> Self {
        Self::new(id, &["customize-control", "customize-control-radio"])
            .with_items(options, checked)
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn with_items(mut self, options: &[&str], checked: Option<&str>) -> Self {
        self.items = options
            .iter()
            .map(|o| ControlItem {
                value: o.to_string(),
                checked: Some(*o) == checked,
            })
            .collect();
        self
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn matches(&self, selector: &str) -> bool {
        let selector = selector.trim();
        if let Some(id) = selector.strip_prefix('#') {
            self.id == id
        } else if let Some(class) = selector.strip_prefix('.') {
            self.has_class(class)
        } else {
            self.id == selector
        }
    }
}

/// A scripted change to a control, as the host would apply it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ControlEdit {
    SetValue { control: String, value: String },
    SetChecked { control: String, checked: bool },
    SetThumbnail { control: String, thumbnail: bool },
    /// Check one item of the control and uncheck the others
    Choose { control: String, value: String },
}

/// Serialized form of a panel
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PanelFixture {
    #[serde(default)]
    pub controls: Vec<Control>,
}

/// Panel held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryPanel {
    controls: Vec<Control>,
    toggles: Vec<(ControlHandle, bool)>,
}

impl MemoryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, control: Control) -> Self {
        self.controls.push(control);
        self
    }

    /// Load a panel fixture from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse_yaml(&content)
    }

    /// Parse a panel fixture from a YAML string
    pub fn parse_yaml(content: &str) -> Result<Self> {
        let fixture: PanelFixture = serde_yaml::from_str(content)?;
        Ok(Self::from(fixture))
    }

    pub fn control(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.id == id)
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    fn find(&self, handle: &ControlHandle) -> Option<&Control> {
        self.control(handle.id())
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Control> {
        self.controls.iter_mut().find(|c| c.id == id)
    }

    /// Current visibility of a control; unknown controls report `false`
    pub fn is_visible(&self, id: &str) -> bool {
        self.control(id).map(|c| c.visible).unwrap_or(false)
    }

    /// Every toggle received so far, in order
    pub fn toggles(&self) -> &[(ControlHandle, bool)] {
        &self.toggles
    }

    /// Number of toggles received for one control
    pub fn toggle_count(&self, id: &str) -> usize {
        self.toggles.iter().filter(|(h, _)| h.id() == id).count()
    }

    pub fn clear_toggles(&mut self) {
        self.toggles.clear();
    }

    pub fn set_value(&mut self, id: &str, value: &str) -> bool {
        self.find_mut(id)
            .map(|c| c.value = Some(value.to_string()))
            .is_some()
    }

    pub fn set_checked(&mut self, id: &str, checked: bool) -> bool {
        self.find_mut(id).map(|c| c.checked = checked).is_some()
    }

    pub fn set_thumbnail(&mut self, id: &str, thumbnail: bool) -> bool {
        self.find_mut(id).map(|c| c.thumbnail = thumbnail).is_some()
    }

    pub fn choose(&mut self, id: &str, value: &str) -> bool {
        match self.find_mut(id) {
            Some(control) => {
                for item in &mut control.items {
                    item.checked = item.value == value;
                }
                true
            }
            None => false,
        }
    }

    /// Apply a scripted edit. Returns `false` if the control does not exist.
    pub fn apply(&mut self, edit: &ControlEdit) -> bool {
        match edit {
            ControlEdit::SetValue { control, value } => self.set_value(control, value),
            ControlEdit::SetChecked { control, checked } => self.set_checked(control, *checked),
            ControlEdit::SetThumbnail { control, thumbnail } => {
                self.set_thumbnail(control, *thumbnail)
            }
            ControlEdit::Choose { control, value } => self.choose(control, value),
        }
    }
}

impl From<PanelFixture> for MemoryPanel {
    fn from(fixture: PanelFixture) -> Self {
        Self {
            controls: fixture.controls,
            toggles: Vec::new(),
        }
    }
}

impl Panel for MemoryPanel {
    fn select(&self, selector: &str) -> Vec<ControlHandle> {
        let parts: Vec<&str> = selector
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        self.controls
            .iter()
            .filter(|c| parts.iter().any(|p| c.matches(p)))
            .map(|c| ControlHandle::new(c.id.clone()))
            .collect()
    }

    fn next_sibling(&self, handle: &ControlHandle) -> Option<ControlHandle> {
        let pos = self.controls.iter().position(|c| c.id == handle.id())?;
        self.controls
            .get(pos + 1)
            .map(|c| ControlHandle::new(c.id.clone()))
    }

    fn classes(&self, handle: &ControlHandle) -> Vec<String> {
        self.find(handle)
            .map(|c| c.classes.clone())
            .unwrap_or_default()
    }

    fn has_thumbnail(&self, handle: &ControlHandle) -> bool {
        self.find(handle).map(|c| c.thumbnail).unwrap_or(false)
    }

    fn is_checked(&self, handle: &ControlHandle) -> bool {
        self.find(handle).map(|c| c.checked).unwrap_or(false)
    }

    fn input_value(&self, handle: &ControlHandle) -> Option<String> {
        self.find(handle).and_then(|c| c.value.clone())
    }

    fn text_input_value(&self, handle: &ControlHandle) -> Option<String> {
        self.input_value(handle)
    }

    fn select_value(&self, handle: &ControlHandle) -> Option<String> {
        self.input_value(handle)
    }

    fn textarea_value(&self, handle: &ControlHandle) -> Option<String> {
        self.input_value(handle)
    }

    fn checked_radio_value(&self, handle: &ControlHandle) -> Option<String> {
        self.find(handle)?
            .items
            .iter()
            .find(|i| i.checked)
            .map(|i| i.value.clone())
    }

    fn last_item_checked(&self, handle: &ControlHandle) -> bool {
        self.find(handle)
            .and_then(|c| c.items.last())
            .map(|i| i.checked)
            .unwrap_or(false)
    }

    fn toggle(&mut self, handle: &ControlHandle, visible: bool) {
        if let Some(control) = self.find_mut(handle.id()) {
            control.visible = visible;
        }
        self.toggles.push((handle.clone(), visible));
    }
}

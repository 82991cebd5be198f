// SPDX-License-Identifier: MIT

//! Host panel abstraction
//!
//! The rule engine never renders anything itself. It reads control state and
//! issues visibility toggles through the [`Panel`] trait, which the hosting UI
//! implements. [`MemoryPanel`] is a self-contained implementation used by the
//! command-line driver and the tests.

mod memory;

pub use memory::{Control, ControlEdit, ControlItem, MemoryPanel, PanelFixture};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a control in the host panel.
///
/// A handle carries nothing but the control's identifier, so it can always be
/// re-queried against the live panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlHandle(String);

impl ControlHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The control's identifier (without a leading `#`)
    pub fn id(&self) -> &str {
        &self.0
    }

    /// Selector that resolves back to this control
    pub fn selector(&self) -> String {
        format!("#{}", self.0)
    }
}

impl fmt::Display for ControlHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The closed set of control kinds the value extractor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Checkbox,
    MediaPicker,
    Select,
    Textarea,
    Radio,
    /// Any text-like input, and the fallback for unrecognised controls
    Generic,
}

/// Class markers the host attaches to control containers
pub mod markers {
    pub const CONTROL: &str = "customize-control";
    pub const CHECKBOX: &str = "customize-control-checkbox";
    pub const IMAGE: &str = "customize-control-image";
    pub const SELECT: &str = "customize-control-select";
    pub const TEXTAREA: &str = "customize-control-textarea";
    pub const RADIO: &str = "customize-control-radio";
    pub const TEXT: &str = "customize-control-text";
}

impl ControlKind {
    /// Determine the kind from a control's class list.
    ///
    /// Checked in a fixed order; the first recognised marker wins. A control
    /// with no recognised marker is treated as a generic text-like input.
    pub fn from_classes<S: AsRef<str>>(classes: &[S]) -> Self {
        let has = |marker: &str| classes.iter().any(|c| c.as_ref() == marker);

        if has(markers::CHECKBOX) {
            ControlKind::Checkbox
        } else if has(markers::IMAGE) {
            ControlKind::MediaPicker
        } else if has(markers::SELECT) {
            ControlKind::Select
        } else if has(markers::TEXTAREA) {
            ControlKind::Textarea
        } else if has(markers::RADIO) {
            ControlKind::Radio
        } else {
            ControlKind::Generic
        }
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControlKind::Checkbox => "checkbox",
            ControlKind::MediaPicker => "media_picker",
            ControlKind::Select => "select",
            ControlKind::Textarea => "textarea",
            ControlKind::Radio => "radio",
            ControlKind::Generic => "generic",
        };
        write!(f, "{}", name)
    }
}

/// Read and toggle access to the host's live control tree.
///
/// Every read is a probe into the current state of one control; nothing is
/// cached on the engine side. Probes against a control that no longer exists
/// return `false` or `None`.
pub trait Panel {
    /// Resolve a selector to controls, in document order.
    ///
    /// `#id` matches a single control by identifier, `.class` matches every
    /// control carrying the class marker. Zero matches is not an error.
    fn select(&self, selector: &str) -> Vec<ControlHandle>;

    /// The element rendered directly after `handle`, if any
    fn next_sibling(&self, handle: &ControlHandle) -> Option<ControlHandle>;

    /// Class markers attached to the control
    fn classes(&self, handle: &ControlHandle) -> Vec<String>;

    /// Whether a selected-image thumbnail is shown inside the control
    fn has_thumbnail(&self, handle: &ControlHandle) -> bool;

    /// Checked state of the control's first input
    fn is_checked(&self, handle: &ControlHandle) -> bool;

    /// Value of the control's first input
    fn input_value(&self, handle: &ControlHandle) -> Option<String>;

    /// Value of the control's first text input
    fn text_input_value(&self, handle: &ControlHandle) -> Option<String>;

    /// Selected option of the control's select box
    fn select_value(&self, handle: &ControlHandle) -> Option<String>;

    /// Contents of the control's textarea
    fn textarea_value(&self, handle: &ControlHandle) -> Option<String>;

    /// Value of the checked option in a radio group, if one is checked
    fn checked_radio_value(&self, handle: &ControlHandle) -> Option<String>;

    /// Whether the input inside the control's last label is checked
    fn last_item_checked(&self, handle: &ControlHandle) -> bool;

    /// Show (with an entering transition) or hide (with a leaving transition)
    fn toggle(&mut self, handle: &ControlHandle, visible: bool);
}

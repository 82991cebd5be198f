// SPDX-License-Identifier: MIT

//! Display-logic predicates
//!
//! A predicate decides whether a rule's targets should currently be shown.
//! Each variant of [`DisplayLogic`] carries the parameters it reads, so a
//! predicate can never be paired with the wrong parameter shape.

use super::compare::{compare, parse_number, CompareOp};
use super::extract::extract_value;
use crate::panel::{ControlHandle, ControlKind, Panel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logic-type tag that returns the comparison result as-is
pub const VISIBLE_IF: &str = "visible_if";

/// Predicates over a group's anchor control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorLogic {
    /// Anchor shows a selected-image thumbnail
    HasThumbnail,
    /// Anchor's text input holds a number greater than zero
    HasPositiveValue,
    /// The last checkable item under the anchor is checked
    LastChildChecked,
}

impl AnchorLogic {
    pub fn evaluate<P: Panel + ?Sized>(&self, panel: &P, anchor: &ControlHandle) -> bool {
        match self {
            AnchorLogic::HasThumbnail => panel.has_thumbnail(anchor),
            AnchorLogic::HasPositiveValue => panel
                .text_input_value(anchor)
                .and_then(|v| parse_number(&v))
                .map(|n| n > 0.0)
                .unwrap_or(false),
            AnchorLogic::LastChildChecked => panel.last_item_checked(anchor),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnchorLogic::HasThumbnail => "has_thumbnail",
            AnchorLogic::HasPositiveValue => "has_positive_value",
            AnchorLogic::LastChildChecked => "last_child_checked",
        }
    }
}

impl fmt::Display for AnchorLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Whether a declaration shows or hides its target when the comparison holds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogicType {
    VisibleIf,
    /// Every tag other than `visible_if` negates the comparison
    HiddenIf(String),
}

impl LogicType {
    pub fn from_tag(tag: &str) -> Self {
        if tag == VISIBLE_IF {
            LogicType::VisibleIf
        } else {
            LogicType::HiddenIf(tag.to_string())
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            LogicType::VisibleIf => VISIBLE_IF,
            LogicType::HiddenIf(tag) => tag,
        }
    }

    fn apply(&self, show: bool) -> bool {
        match self {
            LogicType::VisibleIf => show,
            LogicType::HiddenIf(_) => !show,
        }
    }
}

/// Parameters of a config-driven conditional rule
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalParams {
    pub logic_type: LogicType,
    /// The driver control
    pub setting: ControlHandle,
    /// Resolved once, when the rule is built
    pub kind: ControlKind,
    /// `None` when the configured operator was not recognised
    pub comparison: Option<CompareOp>,
    pub value: String,
}

impl ConditionalParams {
    pub fn evaluate<P: Panel + ?Sized>(&self, panel: &P) -> bool {
        let current = extract_value(panel, &self.setting, self.kind);
        let show = match self.comparison {
            Some(op) => compare(op, &self.value, current.as_deref()),
            None => false,
        };
        log::trace!(
            "{} {}: {:?} vs {:?} -> {}",
            self.logic_type.tag(),
            self.setting,
            current,
            self.value,
            show
        );
        self.logic_type.apply(show)
    }
}

/// A rule's predicate together with the parameters it is evaluated with
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayLogic {
    Anchor {
        logic: AnchorLogic,
        elem: ControlHandle,
    },
    Conditional(ConditionalParams),
}

impl DisplayLogic {
    /// Evaluate against the live panel. Never fails; anything that cannot be
    /// resolved counts as "hide" for `visible_if` rules.
    pub fn evaluate<P: Panel + ?Sized>(&self, panel: &P) -> bool {
        match self {
            DisplayLogic::Anchor { logic, elem } => logic.evaluate(panel, elem),
            DisplayLogic::Conditional(params) => params.evaluate(panel),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DisplayLogic::Anchor { logic, .. } => logic.name(),
            DisplayLogic::Conditional(_) => "conditional_logic",
        }
    }
}

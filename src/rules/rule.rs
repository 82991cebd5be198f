// SPDX-License-Identifier: MIT

//! The unit of conditional display

use crate::logic::DisplayLogic;
use crate::panel::{ControlHandle, Panel};

/// Binds a display-logic predicate to the controls it shows and hides.
///
/// Structure is fixed at construction; only the last applied visibility
/// changes afterwards, and only through reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Last applied visibility, `None` until the first pass
    status: Option<bool>,
    logic: DisplayLogic,
    targets: Vec<ControlHandle>,
}

impl Rule {
    /// Create a rule. Returns `None` when there is nothing to toggle.
    pub fn new(logic: DisplayLogic, targets: Vec<ControlHandle>) -> Option<Self> {
        if targets.is_empty() {
            return None;
        }
        Some(Self {
            status: None,
            logic,
            targets,
        })
    }

    pub fn status(&self) -> Option<bool> {
        self.status
    }

    pub fn logic(&self) -> &DisplayLogic {
        &self.logic
    }

    pub fn targets(&self) -> &[ControlHandle] {
        &self.targets
    }

    /// Compute the visibility the targets should have right now
    pub fn evaluate<P: Panel + ?Sized>(&self, panel: &P) -> bool {
        self.logic.evaluate(panel)
    }

    pub(crate) fn set_status(&mut self, visible: bool) {
        self.status = Some(visible);
    }
}

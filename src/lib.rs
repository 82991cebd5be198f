// SPDX-License-Identifier: MIT

//! Conditional visibility for panel controls
//!
//! Rules tie the visibility of dependent controls to the current value of a
//! driver control. A [`session::PanelSession`] builds the rules from the live
//! panel, applies them once at startup and re-applies them, debounced, as the
//! host reports changes.

pub mod error;
pub mod logic;
pub mod panel;
pub mod reconcile;
pub mod rules;
pub mod session;

pub use error::{DisplayLogicError, Result};
pub use panel::{ControlHandle, ControlKind, Panel};
pub use rules::{PanelConfig, Rule};
pub use session::{HostEvent, PanelSession};

// SPDX-License-Identifier: MIT

//! Rules and their construction
//!
//! This module provides:
//! - `Rule` - a predicate bound to the controls it toggles
//! - `RuleBuilder` - group and explicit-declaration construction strategies
//! - `ConfigLoader` and the configuration types rules are built from

mod builder;
mod loader;
mod rule;
mod types;

pub use builder::{RuleBuilder, BUILTIN_GROUPS};
pub use loader::ConfigLoader;
pub use rule::Rule;
pub use types::{
    ConfigValue, Declaration, ExtendedLogic, GroupSpec, PanelConfig, DEFAULT_QUIET_PERIOD_MS,
};

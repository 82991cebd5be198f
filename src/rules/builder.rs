// SPDX-License-Identifier: MIT

//! Rule builder - constructs rules in bulk from the live panel
//!
//! Two strategies are supported:
//! - control groups, where an anchor control found by identifier suffix
//!   governs its sibling controls
//! - explicit declarations, where a driver setting and a comparison decide
//!   the visibility of a single target selector

use super::rule::Rule;
use super::types::{Declaration, ExtendedLogic, GroupSpec};
use crate::logic::{AnchorLogic, CompareOp, ConditionalParams, DisplayLogic, LogicType};
use crate::panel::{markers, ControlHandle, ControlKind, Panel};
use once_cell::sync::Lazy;

/// Groups every panel gets unless disabled
pub static BUILTIN_GROUPS: Lazy<Vec<GroupSpec>> = Lazy::new(|| {
    vec![
        GroupSpec::new(
            &format!(".{}", markers::IMAGE),
            "_bgimage",
            AnchorLogic::HasThumbnail,
            &["_bgrepeat", "_bgposition", "_bgattachment", "_bgsize"],
        ),
        GroupSpec::new(
            &format!(".{}", markers::TEXT),
            "_borderwidth",
            AnchorLogic::HasPositiveValue,
            &["_bordercolor", "_borderstyle"],
        ),
        GroupSpec::new(
            &format!(".{}", markers::CONTROL),
            "_inherit",
            AnchorLogic::LastChildChecked,
            &[""],
        ),
    ]
});

/// Accumulates rules resolved against one panel
pub struct RuleBuilder<'a, P: Panel + ?Sized> {
    panel: &'a P,
    rules: Vec<Rule>,
}

impl<'a, P: Panel + ?Sized> RuleBuilder<'a, P> {
    pub fn new(panel: &'a P) -> Self {
        Self::with_rules(panel, Vec::new())
    }

    /// Continue appending to an existing rule collection
    pub fn with_rules(panel: &'a P, rules: Vec<Rule>) -> Self {
        Self { panel, rules }
    }

    /// Add one rule per anchor matching the group. Returns the number added.
    pub fn add_control_group(&mut self, group: &GroupSpec) -> usize {
        let anchors: Vec<ControlHandle> = self
            .panel
            .select(&group.selector)
            .into_iter()
            .filter(|h| h.id().ends_with(group.suffix.as_str()))
            .collect();

        let before = self.rules.len();
        for anchor in anchors {
            let base = &anchor.id()[..anchor.id().len() - group.suffix.len()];
            let targets = self.resolve_siblings(&anchor, base, &group.siblings);

            let logic = DisplayLogic::Anchor {
                logic: group.logic,
                elem: anchor.clone(),
            };
            match Rule::new(logic, targets) {
                Some(rule) => {
                    log::debug!(
                        "group rule {} on {} -> {} target(s)",
                        group.logic,
                        anchor,
                        rule.targets().len()
                    );
                    self.rules.push(rule);
                }
                None => log::debug!("no siblings of {} found, skipping", anchor),
            }
        }

        let added = self.rules.len() - before;
        if added == 0 {
            log::debug!(
                "no anchors for '{}' under '{}'",
                group.suffix,
                group.selector
            );
        }
        added
    }

    fn resolve_siblings(
        &self,
        anchor: &ControlHandle,
        base: &str,
        siblings: &[String],
    ) -> Vec<ControlHandle> {
        let mut targets = Vec::new();
        for sibling in siblings {
            let candidate = ControlHandle::new(format!("{}{}", base, sibling));
            let found = self.panel.select(&candidate.selector());
            if found.is_empty() && sibling.is_empty() {
                // No base control rendered; fall back to whatever follows the anchor
                targets.extend(self.panel.next_sibling(anchor));
            } else {
                targets.extend(found);
            }
        }
        targets
    }

    /// Add a single-target conditional rule. Returns the number added (0 or 1).
    pub fn add_control(&mut self, logic_type: &str, declaration: &Declaration) -> usize {
        let targets = self.panel.select(&declaration.target);
        if targets.is_empty() {
            log::debug!("target '{}' not found, skipping", declaration.target);
            return 0;
        }

        let Some(setting) = self.panel.select(&declaration.setting).into_iter().next() else {
            log::debug!("setting '{}' not found, skipping", declaration.setting);
            return 0;
        };

        let kind = ControlKind::from_classes(&self.panel.classes(&setting));
        let comparison = match declaration.comparison.parse::<CompareOp>() {
            Ok(op) => Some(op),
            Err(e) => {
                log::warn!("{} (target '{}')", e, declaration.target);
                None
            }
        };

        let params = ConditionalParams {
            logic_type: LogicType::from_tag(logic_type),
            setting,
            kind,
            comparison,
            value: declaration.value.to_string(),
        };
        log::debug!(
            "{} rule: {} ({}) {} {:?} -> {}",
            logic_type,
            params.setting,
            kind,
            declaration.comparison,
            params.value,
            declaration.target
        );

        match Rule::new(DisplayLogic::Conditional(params), targets) {
            Some(rule) => {
                self.rules.push(rule);
                1
            }
            None => 0,
        }
    }

    /// Add every declaration, grouped by logic type, in order
    pub fn add_extended_logic(&mut self, logic: &ExtendedLogic) -> usize {
        logic
            .iter()
            .flat_map(|(tag, declarations)| declarations.iter().map(move |d| (tag, d)))
            .map(|(tag, declaration)| self.add_control(tag, declaration))
            .sum()
    }

    pub fn add_builtin_groups(&mut self) -> usize {
        BUILTIN_GROUPS
            .iter()
            .map(|group| self.add_control_group(group))
            .sum()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn build(self) -> Vec<Rule> {
        self.rules
    }
}

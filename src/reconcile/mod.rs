// SPDX-License-Identifier: MIT

//! Reconciliation of rule state against the live panel
//!
//! A pass re-evaluates every rule and toggles targets only for rules whose
//! computed visibility differs from the last applied one. A pass over an
//! unchanged panel performs no toggles.

mod debounce;

pub use debounce::Debouncer;

use crate::panel::Panel;
use crate::rules::Rule;

/// What a single reconcile pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Rules evaluated
    pub evaluated: usize,
    /// Rules whose visibility changed
    pub changed: usize,
    /// Individual target toggles issued
    pub toggled: usize,
}

impl ReconcileReport {
    pub fn is_noop(&self) -> bool {
        self.changed == 0
    }
}

/// Re-evaluate every rule and apply actual transitions
pub fn reconcile<P: Panel + ?Sized>(rules: &mut [Rule], panel: &mut P) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    for rule in rules.iter_mut() {
        let visible = rule.evaluate(&*panel);
        report.evaluated += 1;

        if rule.status() == Some(visible) {
            continue;
        }

        for target in rule.targets() {
            panel.toggle(target, visible);
            report.toggled += 1;
        }
        log::trace!(
            "{} {:?} -> {} ({} target(s))",
            rule.logic().name(),
            rule.status(),
            visible,
            rule.targets().len()
        );
        rule.set_status(visible);
        report.changed += 1;
    }

    if !report.is_noop() {
        log::info!(
            "reconciled {} rule(s): {} changed, {} toggle(s)",
            report.evaluated,
            report.changed,
            report.toggled
        );
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::{Control, MemoryPanel};
    use crate::rules::{Declaration, RuleBuilder};

    fn checkbox_panel() -> (MemoryPanel, Vec<Rule>) {
        let panel = MemoryPanel::new()
            .with(Control::checkbox("customize-control-show_cta", false))
            .with(Control::text("customize-control-cta_label", "Buy"));
        let mut builder = RuleBuilder::new(&panel);
        builder.add_control(
            "visible_if",
            &Declaration::new(
                "#customize-control-cta_label",
                "#customize-control-show_cta",
                "==",
                "true",
            ),
        );
        let rules = builder.build();
        (panel, rules)
    }

    #[test]
    fn test_first_pass_applies_every_rule() {
        let (mut panel, mut rules) = checkbox_panel();
        let report = reconcile(&mut rules, &mut panel);
        assert_eq!(
            report,
            ReconcileReport {
                evaluated: 1,
                changed: 1,
                toggled: 1
            }
        );
        assert_eq!(rules[0].status(), Some(false));
        assert!(!panel.is_visible("customize-control-cta_label"));
    }

    #[test]
    fn test_second_pass_is_noop() {
        let (mut panel, mut rules) = checkbox_panel();
        reconcile(&mut rules, &mut panel);
        panel.clear_toggles();

        let report = reconcile(&mut rules, &mut panel);
        assert!(report.is_noop());
        assert_eq!(report.toggled, 0);
        assert!(panel.toggles().is_empty());
    }

    #[test]
    fn test_transition_toggles_once() {
        let (mut panel, mut rules) = checkbox_panel();
        reconcile(&mut rules, &mut panel);
        panel.clear_toggles();

        panel.set_checked("customize-control-show_cta", true);
        let report = reconcile(&mut rules, &mut panel);
        assert_eq!(report.changed, 1);
        assert_eq!(panel.toggle_count("customize-control-cta_label"), 1);
        assert!(panel.is_visible("customize-control-cta_label"));
        assert_eq!(rules[0].status(), Some(true));

        reconcile(&mut rules, &mut panel);
        assert_eq!(panel.toggle_count("customize-control-cta_label"), 1);
    }

    #[test]
    fn test_empty_rule_set() {
        let mut panel = MemoryPanel::new();
        let report = reconcile(&mut [], &mut panel);
        assert_eq!(report, ReconcileReport::default());
    }
}

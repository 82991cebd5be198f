// SPDX-License-Identifier: MIT

//! Panel session - the lifetime of conditional display on one panel
//!
//! Rules are built once from the panel and configuration, reconciled
//! synchronously so the panel starts out consistent, and then re-reconciled
//! after each burst of host notifications settles.

use crate::panel::Panel;
use crate::reconcile::{reconcile, Debouncer, ReconcileReport};
use crate::rules::{PanelConfig, Rule, RuleBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

/// A named notification from the host panel
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct HostEvent(String);

impl HostEvent {
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn change() -> Self {
        Self::new("change")
    }

    pub fn ready() -> Self {
        Self::new("ready")
    }

    pub fn kind(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owns the panel, its rules and the debounce timer
pub struct PanelSession<P: Panel> {
    panel: P,
    rules: Vec<Rule>,
    events: HashSet<String>,
    debouncer: Debouncer,
    initial: ReconcileReport,
    passes: usize,
    last_pass: Option<Instant>,
}

impl<P: Panel> PanelSession<P> {
    /// Build rules for `panel` and run the initial reconcile pass.
    ///
    /// Built-in groups come first, then configured groups, then explicit
    /// declarations.
    pub fn new(panel: P, config: &PanelConfig) -> Self {
        let rules = {
            let mut builder = RuleBuilder::new(&panel);
            if config.builtin_groups {
                builder.add_builtin_groups();
            }
            for group in &config.groups {
                builder.add_control_group(group);
            }
            builder.add_extended_logic(&config.conditional_logic);
            builder.build()
        };
        Self::with_rules(panel, rules, config)
    }

    /// Start a session over rules built elsewhere
    pub fn with_rules(mut panel: P, mut rules: Vec<Rule>, config: &PanelConfig) -> Self {
        let debouncer = Debouncer::new(config.quiet_period());
        let initial = reconcile(&mut rules, &mut panel);
        log::info!(
            "panel session started: {} rule(s), {} initial toggle(s), quiet period {:?}",
            rules.len(),
            initial.toggled,
            debouncer.quiet_period()
        );

        Self {
            panel,
            rules,
            events: config.events.iter().cloned().collect(),
            debouncer,
            initial,
            passes: 0,
            last_pass: None,
        }
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Mutable access for the host to change control state
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// Hand the panel back once the session is over
    pub fn into_panel(self) -> P {
        self.panel
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Outcome of the synchronous startup pass
    pub fn initial_report(&self) -> ReconcileReport {
        self.initial
    }

    /// Reconcile passes run since startup
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn last_pass(&self) -> Option<Instant> {
        self.last_pass
    }

    /// Delay between the last subscribed event and the pass it schedules
    pub fn quiet_period(&self) -> Duration {
        self.debouncer.quiet_period()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn is_subscribed(&self, event: &HostEvent) -> bool {
        self.events.contains(event.kind())
    }

    /// Handle a host notification. Subscribed kinds (re)arm the debounce
    /// timer; returns whether the event was accepted.
    pub fn notify(&mut self, event: &HostEvent) -> bool {
        if !self.is_subscribed(event) {
            log::trace!("ignoring event '{}'", event);
            return false;
        }
        log::debug!("event '{}' scheduled a pass", event);
        self.debouncer.trigger();
        true
    }

    /// Run a pass immediately, bypassing the debounce timer
    pub fn reconcile_now(&mut self) -> ReconcileReport {
        self.debouncer.cancel();
        self.run_pass()
    }

    fn run_pass(&mut self) -> ReconcileReport {
        let report = reconcile(&mut self.rules, &mut self.panel);
        self.passes += 1;
        self.last_pass = Some(Instant::now());
        report
    }

    /// Let time pass until `until`, running the pending pass if it falls due
    pub async fn advance_until(&mut self, until: Instant) -> Option<ReconcileReport> {
        let report = match self.debouncer.deadline() {
            Some(deadline) if deadline <= until => {
                self.debouncer.fired().await;
                Some(self.run_pass())
            }
            _ => None,
        };
        sleep_until(until).await;
        report
    }

    /// Wait out and run the pending pass, if any
    pub async fn flush(&mut self) -> Option<ReconcileReport> {
        if !self.debouncer.is_pending() {
            return None;
        }
        self.debouncer.fired().await;
        Some(self.run_pass())
    }

    /// Consume host notifications until the sender side closes, then flush.
    pub async fn run(&mut self, mut events: mpsc::UnboundedReceiver<HostEvent>) {
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => {
                        self.notify(&event);
                    }
                    None => break,
                },
                _ = self.debouncer.fired() => {
                    self.run_pass();
                }
            }
        }
        self.flush().await;
        log::debug!("event stream closed after {} pass(es)", self.passes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::{Control, MemoryPanel};
    use crate::rules::Declaration;

    fn config() -> PanelConfig {
        let mut config = PanelConfig::default();
        config.conditional_logic.push(
            "visible_if",
            Declaration::new(
                "#customize-control-logo_width",
                "#customize-control-logo",
                "==",
                "true",
            ),
        );
        config
    }

    fn panel() -> MemoryPanel {
        MemoryPanel::new()
            .with(Control::image("customize-control-logo", false))
            .with(Control::text("customize-control-logo_width", "120"))
    }

    #[test]
    fn test_initial_pass_is_synchronous() {
        let session = PanelSession::new(panel(), &config());
        assert_eq!(session.rules().len(), 1);
        assert_eq!(session.initial_report().toggled, 1);
        assert_eq!(session.passes(), 0);
        assert!(!session.panel().is_visible("customize-control-logo_width"));
    }

    #[test]
    fn test_unsubscribed_events_are_ignored() {
        let mut session = PanelSession::new(panel(), &config());
        assert!(!session.notify(&HostEvent::new("saved")));
        assert!(!session.is_pending());
        assert!(session.notify(&HostEvent::change()));
        assert!(session.is_pending());
    }

    #[test]
    fn test_reconcile_now_cancels_pending() {
        let mut session = PanelSession::new(panel(), &config());
        session.panel_mut().set_thumbnail("customize-control-logo", true);
        session.notify(&HostEvent::change());

        let report = session.reconcile_now();
        assert_eq!(report.changed, 1);
        assert!(!session.is_pending());
        assert!(session.panel().is_visible("customize-control-logo_width"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_advance_until_runs_due_pass_only() {
        let mut session = PanelSession::new(panel(), &config());
        let start = Instant::now();
        session.panel_mut().set_thumbnail("customize-control-logo", true);
        session.notify(&HostEvent::ready());

        let early = session
            .advance_until(start + Duration::from_millis(100))
            .await;
        assert!(early.is_none());
        assert_eq!(session.passes(), 0);

        let due = session
            .advance_until(start + Duration::from_millis(300))
            .await;
        assert_eq!(due.map(|r| r.changed), Some(1));
        assert_eq!(session.passes(), 1);
    }

    #[test]
    fn test_session_without_events_ignores_notifications() {
        let mut config = config();
        config.events.clear();
        let mut session = PanelSession::new(panel(), &config);
        assert!(!session.notify(&HostEvent::change()));
        assert!(!session.is_pending());
        assert_eq!(session.initial_report().evaluated, 1);
    }

    #[test]
    fn test_quiet_period_follows_config() {
        let mut config = config();
        config.quiet_period_ms = 75;
        let session = PanelSession::new(panel(), &config);
        assert_eq!(session.quiet_period(), Duration::from_millis(75));
    }

    #[test]
    fn test_into_panel_keeps_applied_visibility() {
        let mut session = PanelSession::new(panel(), &config());
        session.panel_mut().set_thumbnail("customize-control-logo", true);
        session.reconcile_now();

        let panel = session.into_panel();
        assert!(panel.is_visible("customize-control-logo_width"));
        assert_eq!(panel.toggle_count("customize-control-logo_width"), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_without_pending_pass() {
        let mut session = PanelSession::new(panel(), &config());
        assert!(session.flush().await.is_none());
        assert_eq!(session.passes(), 0);
    }
}

// SPDX-License-Identifier: MIT

//! Cancel-and-reschedule debounce primitive
//!
//! At most one deadline is pending. Triggering again replaces it, so a burst
//! of triggers produces a single firing one quiet period after the last one.

use std::future;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Arm the timer, replacing any pending deadline
    pub fn trigger(&mut self) {
        self.trigger_at(Instant::now());
    }

    /// Arm the timer as if triggered at `now`
    pub fn trigger_at(&mut self, now: Instant) {
        if self.deadline.is_some() {
            log::trace!("debounce: rescheduling pending pass");
        }
        self.deadline = Some(now + self.quiet);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Wait until the pending deadline passes and disarm.
    ///
    /// Never resolves while nothing is pending. Dropping the future before it
    /// resolves leaves the deadline armed.
    pub async fn fired(&mut self) {
        match self.deadline {
            Some(deadline) => {
                sleep_until(deadline).await;
                self.deadline = None;
            }
            None => future::pending::<()>().await,
        }
    }
}

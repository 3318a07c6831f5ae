//! Progress tracking for possibly unbounded enumerations.
//!
//! A [`Runner`] records whether an enumeration has finished, whether it
//! has been killed, and whether the current time budget has elapsed.
//! Strategies poll [`Runner::stopped`] between units of work; the owning
//! congruence resets `finished` whenever new information arrives.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Minimum interval between progress reports.
pub const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Tracks completion, cancellation and time budget of an enumeration.
#[derive(Debug)]
pub struct Runner {
    finished: bool,
    dead: Arc<AtomicBool>,
    deadline: Option<Instant>,
    last_report: Instant,
}

/// Cloneable handle that kills a [`Runner`] from elsewhere, e.g. another thread.
#[derive(Debug, Clone)]
pub struct KillHandle {
    dead: Arc<AtomicBool>,
}

impl KillHandle {
    /// Permanently stop the runner this handle was taken from.
    pub fn kill(&self) {
        self.dead.store(true, Ordering::Release);
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner {
    pub fn new() -> Self {
        Self {
            finished: false,
            dead: Arc::new(AtomicBool::new(false)),
            deadline: None,
            last_report: Instant::now(),
        }
    }

    /// Whether the full answer is known.
    ///
    /// A killed runner never reports finished: killing may leave the
    /// enumeration in a half-updated state.
    pub fn finished(&self) -> bool {
        !self.dead() && self.finished
    }

    pub fn set_finished(&mut self, finished: bool) {
        self.finished = finished;
    }

    /// Whether the runner has been permanently stopped.
    pub fn dead(&self) -> bool {
        self.dead.load(Ordering::Acquire)
    }

    pub fn kill(&self) {
        self.dead.store(true, Ordering::Release);
    }

    pub fn kill_handle(&self) -> KillHandle {
        KillHandle {
            dead: Arc::clone(&self.dead),
        }
    }

    /// Arm a time budget for the next run. `None` runs until finished.
    pub fn set_budget(&mut self, budget: Option<Duration>) {
        match budget {
            Some(d) => {
                tracing::debug!(budget_ms = d.as_millis() as u64, "running with a time budget");
                self.deadline = Instant::now().checked_add(d);
            }
            None => {
                tracing::debug!("running until finished, with no time limit");
                self.deadline = None;
            }
        }
    }

    /// Whether the current time budget has elapsed.
    pub fn timed_out(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Whether work should stop: finished, killed, or out of time.
    pub fn stopped(&self) -> bool {
        self.finished() || self.dead() || self.timed_out()
    }

    /// Returns true at most once per [`REPORT_INTERVAL`].
    pub fn report(&mut self) -> bool {
        let now = Instant::now();
        if now.duration_since(self.last_report) > REPORT_INTERVAL {
            self.last_report = now;
            true
        } else {
            false
        }
    }

    /// A short description of why work stopped, if it did.
    pub fn stop_reason(&self) -> Option<&'static str> {
        if self.finished() {
            Some("finished")
        } else if self.dead() {
            Some("killed")
        } else if self.timed_out() {
            Some("timed out")
        } else {
            None
        }
    }

    pub fn report_why_we_stopped(&self) {
        if let Some(reason) = self.stop_reason() {
            tracing::debug!(reason, "enumeration stopped");
        }
    }
}

//! Deadline scheduler for the staged feedback transition and the
//! affordance settle checks. All methods take `now` explicitly so the
//! sequencing logic is testable without real timers; the TUI loop drains
//! due tasks once per iteration.

use std::time::{Duration, Instant};

/// Matches the fade-out animation of the rendering surface.
pub const FADE_OUT: Duration = Duration::from_millis(260);
/// Fade-in settle before listeners are re-armed after the content swap.
pub const FEEDBACK_SETTLE: Duration = Duration::from_millis(340);
/// Two fixed re-checks after a screen is built, catching reflow that no
/// event signals.
pub const SETTLE_CHECK_EARLY: Duration = Duration::from_millis(50);
pub const SETTLE_CHECK_LATE: Duration = Duration::from_millis(300);
/// Resizes arrive in bursts; recompute again once the viewport settles.
pub const RESIZE_SETTLE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    SwapFeedback,
    FeedbackSettle,
    AffordanceCheck,
    ResizeSettle,
    ImageRecheck,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Vec<(Instant, Task)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_in(&mut self, now: Instant, delay: Duration, task: Task) {
        self.pending.push((now + delay, task));
    }

    /// Drop every pending deadline. Called on each screen transition so no
    /// task of a previous screen can fire after navigation away from it.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn cancel(&mut self, task: Task) {
        self.pending.retain(|(_, t)| *t != task);
    }

    /// Remove and return every task whose deadline has passed, in deadline
    /// order.
    pub fn pop_due(&mut self, now: Instant) -> Vec<Task> {
        let mut due: Vec<(Instant, Task)> = Vec::new();
        let mut rest: Vec<(Instant, Task)> = Vec::new();
        for entry in self.pending.drain(..) {
            if entry.0 <= now {
                due.push(entry);
            } else {
                rest.push(entry);
            }
        }
        self.pending = rest;
        due.sort_by_key(|(at, _)| *at);
        due.into_iter().map(|(_, task)| task).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|(at, _)| *at).min()
    }
}

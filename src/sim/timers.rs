//! Deterministic task scheduler on a simulated clock
//!
//! The engine runs three kinds of scheduled work: the per-frame physics task,
//! the one-second countdown and the combo-expiry one-shot. Each kind has at
//! most one outstanding task, so the kind itself is the cancellation handle:
//! arming a kind replaces whatever was there. Cancelling is always safe to
//! repeat.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The kinds of scheduled work the engine owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// One-shot: combo resets when it fires
    ComboExpiry,
    /// Repeating 1 s: decrements the clock
    Countdown,
    /// Repeating per display frame: advances target physics
    Frame,
}

impl TimerKind {
    /// Dispatch order for tasks due at the same instant
    pub const ALL: [TimerKind; 3] = [TimerKind::ComboExpiry, TimerKind::Countdown, TimerKind::Frame];

    #[inline]
    fn slot(self) -> usize {
        match self {
            TimerKind::ComboExpiry => 0,
            TimerKind::Countdown => 1,
            TimerKind::Frame => 2,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Task {
    due: Duration,
    /// `Some` for repeating tasks
    period: Option<Duration>,
}

/// Simulated clock plus one task slot per [`TimerKind`]
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: Duration,
    tasks: [Option<Task>; 3],
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Arm a repeating task, replacing any task of the same kind
    pub fn start_interval(&mut self, kind: TimerKind, period: Duration) {
        let period = period.max(Duration::from_nanos(1));
        self.arm(kind, period, Some(period));
    }

    /// Arm a one-shot task, replacing any task of the same kind
    pub fn start_once(&mut self, kind: TimerKind, delay: Duration) {
        self.arm(kind, delay, None);
    }

    fn arm(&mut self, kind: TimerKind, delay: Duration, period: Option<Duration>) {
        self.tasks[kind.slot()] = Some(Task {
            due: self.now + delay,
            period,
        });
    }

    /// Cancel whatever task of `kind` is armed. Returns false if none was.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        self.tasks[kind.slot()].take().is_some()
    }

    pub fn cancel_all(&mut self) {
        self.tasks = [None; 3];
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.tasks[kind.slot()].is_some()
    }

    /// Time until the task of `kind` next fires
    pub fn remaining(&self, kind: TimerKind) -> Option<Duration> {
        self.tasks[kind.slot()].map(|task| task.due.saturating_sub(self.now))
    }

    /// Cancel a task and return how long it still had to run
    pub fn suspend(&mut self, kind: TimerKind) -> Option<Duration> {
        let remaining = self.remaining(kind);
        self.cancel(kind);
        remaining
    }

    /// Pop the earliest task due at or before `until`.
    ///
    /// The clock moves to the task's due time. Repeating tasks are
    /// rescheduled one period later, one-shots are removed.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerKind> {
        let kind = TimerKind::ALL
            .into_iter()
            .filter_map(|kind| self.tasks[kind.slot()].map(|task| (kind, task.due)))
            .filter(|&(_, due)| due <= until)
            .min_by_key(|&(kind, due)| (due, kind.slot()))
            .map(|(kind, _)| kind)?;

        let task = self.tasks[kind.slot()]?;
        self.now = self.now.max(task.due);
        self.tasks[kind.slot()] = task.period.map(|period| Task {
            due: task.due + period,
            ..task
        });
        Some(kind)
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

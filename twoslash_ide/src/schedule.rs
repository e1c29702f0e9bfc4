//! Pass scheduling: debounce, undo/redo bypass, self-trigger suppression and a single-slot
//! queue so at most one pass runs at a time.
//!
//! The scheduler is a plain state machine. The host owns the clock and the timers: it reports
//! changes with [`Scheduler::on_change`], arms a timer for the returned deadline, calls
//! [`Scheduler::poll`] when it fires, and brackets every pass with [`Scheduler::begin`] /
//! [`Scheduler::finish`].
//!
//! Editors may report the pass's own edit before `finish` knows its version. A typed change
//! seen while a pass runs is therefore held back and only armed by `finish` when its version is
//! not the one the pass produced.

use std::time::Duration;

use crate::ContentChange;
use crate::apply::ApplyMode;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Nothing to do (the change was produced by our own pass).
    Ignored,
    /// A pass is due at `deadline` unless another change arrives first.
    Debounced { deadline: Duration },
    /// Run a pass now.
    Immediate { mode: ApplyMode },
    /// A pass is in flight; this request will be returned by [`Scheduler::finish`].
    Queued { mode: ApplyMode },
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    delay: Duration,
    deadline: Option<Duration>,
    running: bool,
    pending: Option<ApplyMode>,
    /// Typed change seen while running: its version and debounce deadline.
    deferred: Option<(u64, Duration)>,
    self_version: Option<u64>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Scheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            running: false,
            pending: None,
            deferred: None,
            self_version: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Reacts to a content change observed at `now`.
    ///
    /// Undo/redo bypasses the debounce and asks for a replay pass; any other change (re)arms
    /// the debounce deadline, so the last change of a burst wins.
    pub fn on_change(&mut self, change: &ContentChange, now: Duration) -> Trigger {
        if self.self_version == Some(change.version_id) {
            tracing::trace!(version = change.version_id, "ignoring self-triggered change");
            return Trigger::Ignored;
        }

        if change.is_undo_redo() {
            self.deadline = None;
            self.deferred = None;
            return self.request(ApplyMode::Replay);
        }

        let deadline = now + self.delay;
        if self.running {
            self.deferred = Some((change.version_id, deadline));
        } else {
            self.deadline = Some(deadline);
        }
        Trigger::Debounced { deadline }
    }

    /// Asks for an undoable pass right away, e.g. after an option was toggled.
    pub fn request_now(&mut self) -> Trigger {
        self.deadline = None;
        self.deferred = None;
        self.request(ApplyMode::UndoGroup)
    }

    fn request(&mut self, mode: ApplyMode) -> Trigger {
        if self.running {
            self.pending = Some(mode);
            Trigger::Queued { mode }
        } else {
            Trigger::Immediate { mode }
        }
    }

    /// Returns the mode of a debounced pass once its deadline has passed and no pass runs.
    pub fn poll(&mut self, now: Duration) -> Option<ApplyMode> {
        if self.running {
            return None;
        }
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                Some(ApplyMode::UndoGroup)
            }
            _ => None,
        }
    }

    /// Marks a pass as started. When one is already running the request takes the single
    /// pending slot instead and `false` is returned.
    pub fn begin(&mut self, mode: ApplyMode) -> bool {
        if self.running {
            self.pending = Some(mode);
            return false;
        }
        self.running = true;
        true
    }

    /// Marks the running pass as finished.
    ///
    /// `applied_version` is the document version the pass produced, if it wrote anything; a
    /// later change notification carrying that version is ignored, and so is a change with that
    /// version reported while the pass ran. Any other change seen meanwhile arms the debounce
    /// deadline. Returns the request that arrived while the pass was running, which the caller
    /// should run next.
    pub fn finish(&mut self, applied_version: Option<u64>) -> Option<ApplyMode> {
        self.running = false;
        if applied_version.is_some() {
            self.self_version = applied_version;
        }
        match self.deferred.take() {
            Some((version, _)) if Some(version) == applied_version => {
                tracing::trace!(version, "dropping self-triggered change seen mid-pass");
            }
            Some((_, deadline)) => {
                self.deadline = Some(self.deadline.map_or(deadline, |d| d.max(deadline)));
            }
            None => {}
        }
        self.pending.take()
    }
}

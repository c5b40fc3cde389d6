#![forbid(unsafe_code)]

//! Deterministic, host-driven scheduler and clock.
//!
//! [`VirtualHost`] stands in for the browser's frame and timer queues. Time
//! only moves when the caller says so:
//!
//! 1. [`VirtualHost::advance`] moves the clock and fires due timers.
//! 2. [`VirtualHost::run_frame`] runs the frame callbacks queued so far.
//! 3. [`VirtualHost::step`] does both, like one display refresh.
//!
//! # Invariants
//!
//! 1. Timers fire in `(due time, insertion order)` order.
//! 2. While a timer runs, [`Clock::now`] reports that timer's due time, so a
//!    timer scheduled from inside a timer is measured from the right instant
//!    and still fires within the same `advance` if it falls due.
//! 3. A frame callback requested during `run_frame` runs on the next frame,
//!    never the current one.
//! 4. No task runs while an internal borrow is held; tasks may freely
//!    schedule more work.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::time::Duration;

use crate::host::{Clock, DelayScheduler, FrameScheduler, Task};

/// Default frame interval used by [`VirtualHost::run_for`] callers (~60 Hz).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

struct PendingTimer {
    due: Duration,
    seq: u64,
    task: Task,
}

impl PartialEq for PendingTimer {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for PendingTimer {}

impl PartialOrd for PendingTimer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingTimer {
    // Reversed so the max-heap pops the earliest timer first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Default)]
struct SimState {
    now: Duration,
    next_seq: u64,
    frames: Vec<Task>,
    timers: BinaryHeap<PendingTimer>,
    frames_run: u64,
    timers_fired: u64,
}

/// Deterministic frame + timer host.
#[derive(Default)]
pub struct VirtualHost {
    state: RefCell<SimState>,
}

impl fmt::Debug for VirtualHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("VirtualHost")
            .field("now", &state.now)
            .field("pending_frames", &state.frames.len())
            .field("pending_timers", &state.timers.len())
            .finish()
    }
}

impl VirtualHost {
    /// Create a host with the clock at zero and empty queues.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Frame callbacks waiting for the next [`run_frame`](Self::run_frame).
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }

    /// Timers not yet fired.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Total frames run so far.
    #[must_use]
    pub fn frames_run(&self) -> u64 {
        self.state.borrow().frames_run
    }

    /// Total timers fired so far.
    #[must_use]
    pub fn timers_fired(&self) -> u64 {
        self.state.borrow().timers_fired
    }

    /// Advance the clock by `dt`, firing every timer that falls due.
    ///
    /// Returns the number of timers fired.
    pub fn advance(&self, dt: Duration) -> usize {
        let target = self.state.borrow().now.saturating_add(dt);
        let mut fired = 0;
        loop {
            let task = {
                let mut state = self.state.borrow_mut();
                match state.timers.peek() {
                    Some(timer) if timer.due <= target => {}
                    _ => break,
                }
                let Some(timer) = state.timers.pop() else {
                    break;
                };
                state.now = state.now.max(timer.due);
                state.timers_fired += 1;
                timer.task
            };
            task();
            fired += 1;
        }
        let mut state = self.state.borrow_mut();
        state.now = state.now.max(target);
        fired
    }

    /// Run every frame callback queued before this call.
    ///
    /// Returns the number of callbacks run.
    pub fn run_frame(&self) -> usize {
        let tasks = {
            let mut state = self.state.borrow_mut();
            state.frames_run += 1;
            std::mem::take(&mut state.frames)
        };
        let count = tasks.len();
        for task in tasks {
            task();
        }
        count
    }

    /// One display refresh: advance by `dt`, then run a frame.
    pub fn step(&self, dt: Duration) {
        self.advance(dt);
        self.run_frame();
    }

    /// Repeat [`step`](Self::step) with `frame` spacing until `total` has elapsed.
    ///
    /// A zero `frame` interval runs a single step.
    pub fn run_for(&self, total: Duration, frame: Duration) {
        if frame.is_zero() {
            self.step(total);
            return;
        }
        let mut elapsed = Duration::ZERO;
        while elapsed < total {
            let dt = frame.min(total - elapsed);
            self.step(dt);
            elapsed += dt;
        }
    }

    /// Fire all timers regardless of due time, moving the clock to the last one.
    pub fn drain_timers(&self) -> usize {
        let mut fired = 0;
        loop {
            let last_due = self.state.borrow().timers.peek().map(|t| t.due);
            let Some(due) = last_due else {
                return fired;
            };
            let now = self.now();
            fired += self.advance(due.saturating_sub(now));
        }
    }
}

impl FrameScheduler for VirtualHost {
    fn request_frame(&self, task: Task) {
        self.state.borrow_mut().frames.push(task);
    }
}

impl DelayScheduler for VirtualHost {
    fn after(&self, delay: Duration, task: Task) {
        let mut state = self.state.borrow_mut();
        let due = state.now.saturating_add(delay);
        let seq = state.next_seq;
        state.next_seq += 1;
        state.timers.push(PendingTimer { due, seq, task });
    }
}

impl Clock for VirtualHost {
    fn now(&self) -> Duration {
        self.state.borrow().now
    }
}

#![forbid(unsafe_code)]

//! Host collaborator traits.
//!
//! Effects never reach for a global event loop, clock, or RNG. Everything
//! time- or entropy-related is injected through these traits so a browser
//! binding and the deterministic [`VirtualHost`](crate::sim::VirtualHost)
//! are interchangeable.
//!
//! # Invariants
//!
//! 1. A task passed to [`FrameScheduler::request_frame`] or
//!    [`DelayScheduler::after`] runs at most once.
//! 2. Tasks never run re-entrantly from inside the scheduling call.
//! 3. [`Clock::now`] is monotonic non-decreasing.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::geometry::Size;
use crate::random::RandomSource;

/// A one-shot unit of deferred work.
pub type Task = Box<dyn FnOnce() + 'static>;

/// Per-frame callback queue (the browser's `requestAnimationFrame`).
pub trait FrameScheduler {
    /// Run `task` once, on the next rendered frame.
    fn request_frame(&self, task: Task);
}

/// Delayed callback queue (the browser's `setTimeout`).
pub trait DelayScheduler {
    /// Run `task` once, after at least `delay` has elapsed.
    fn after(&self, delay: Duration, task: Task);
}

/// Monotonic time source.
pub trait Clock {
    /// Time since an arbitrary, fixed origin.
    fn now(&self) -> Duration;
}

/// Current size of the visible viewport, in CSS pixels.
pub trait Viewport {
    fn size(&self) -> Size;
}

/// Handle to something mounted on the page that can remove itself.
pub trait Detach {
    /// Remove the element from its parent. Consumes the handle.
    fn detach(self);
}

/// The shared collaborators every effect is constructed with.
///
/// Cheap to clone; all members are reference counted.
#[derive(Clone)]
pub struct HostServices {
    pub frames: Rc<dyn FrameScheduler>,
    pub timers: Rc<dyn DelayScheduler>,
    pub clock: Rc<dyn Clock>,
    pub random: Rc<dyn RandomSource>,
}

impl HostServices {
    /// Bundle explicit collaborators.
    #[must_use]
    pub fn new(
        frames: Rc<dyn FrameScheduler>,
        timers: Rc<dyn DelayScheduler>,
        clock: Rc<dyn Clock>,
        random: Rc<dyn RandomSource>,
    ) -> Self {
        Self {
            frames,
            timers,
            clock,
            random,
        }
    }

    /// Use one host for frames, timers and time, plus a separate random source.
    #[must_use]
    pub fn from_host<H>(host: Rc<H>, random: Rc<dyn RandomSource>) -> Self
    where
        H: FrameScheduler + DelayScheduler + Clock + 'static,
    {
        Self {
            frames: host.clone(),
            timers: host.clone(),
            clock: host,
            random,
        }
    }
}

impl fmt::Debug for HostServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostServices")
            .field("now", &self.clock.now())
            .finish_non_exhaustive()
    }
}

/// A viewport with a fixed size, for headless hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedViewport(pub Size);

impl Viewport for FixedViewport {
    fn size(&self) -> Size {
        self.0
    }
}

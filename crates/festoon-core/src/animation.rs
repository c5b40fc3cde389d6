#![forbid(unsafe_code)]

//! Wall-clock progress.
//!
//! Effects in this workspace are driven by elapsed wall-clock time rather
//! than frame counts, so a dropped frame shortens nothing: progress is always
//! `elapsed / duration`, clamped.

pub mod stagger;

use std::time::Duration;

/// Fraction of `duration` covered by `elapsed`, clamped to [0.0, 1.0].
///
/// A zero duration is complete immediately.
#[inline]
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// A fixed-length span of wall-clock time anchored at a start instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    start: Duration,
    duration: Duration,
}

impl Timeline {
    /// Start a timeline at clock reading `start`.
    #[must_use]
    pub const fn starting_at(start: Duration, duration: Duration) -> Self {
        Self { start, duration }
    }

    /// Linear progress at clock reading `now`. Readings before `start` count as 0.
    #[must_use]
    pub fn progress_at(&self, now: Duration) -> f64 {
        progress(now.saturating_sub(self.start), self.duration)
    }
}

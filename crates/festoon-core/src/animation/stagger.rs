#![forbid(unsafe_code)]

//! Stagger offsets: when each item of a batch should start.
//!
//! Bursts schedule their spawns through [`stagger_offsets`] so the spacing
//! policy lives in one place.
//!
//! # Invariants
//!
//! 1. `stagger_offsets(0, ..)` returns an empty vec.
//! 2. First offset is always `Duration::ZERO`.
//! 3. offset[i] = i * delay exactly (integer arithmetic, saturating).

use std::time::Duration;

/// Compute stagger delay offsets for `count` items spaced by `delay`.
#[must_use]
pub fn stagger_offsets(count: usize, delay: Duration) -> Vec<Duration> {
    (0..count)
        .map(|i| delay.saturating_mul(u32::try_from(i).unwrap_or(u32::MAX)))
        .collect()
}

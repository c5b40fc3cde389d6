#![forbid(unsafe_code)]

//! Uniform random sources.
//!
//! Effects draw every random decision through [`RandomSource`] so a seeded
//! source makes an entire run reproducible.

use std::cell::Cell;

/// A source of uniformly distributed values in `[0, 1)`.
///
/// Takes `&self` so one source can be shared by several effects and by the
/// deferred tasks they schedule.
pub trait RandomSource {
    /// Next value, uniform in `[0, 1)`.
    fn next_unit(&self) -> f64;

    /// Next value, uniform in `[min, max)`.
    fn range(&self, min: f64, max: f64) -> f64 {
        min + self.next_unit() * (max - min)
    }

    /// Uniform index into a collection of `len` items. Returns 0 when `len == 0`.
    fn index(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.next_unit() * len as f64) as usize).min(len - 1)
    }
}

/// Deterministic xorshift64 source.
///
/// Equal seeds produce equal sequences on every platform.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: Cell<u64>,
}

impl SeededRandom {
    /// Create a source from `seed`. Any seed is valid, including 0.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        // xorshift has a fixed point at 0; mix the seed so it never lands there.
        let mixed = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ 0xD1B5_4A32_D192_ED03;
        Self {
            state: Cell::new(if mixed == 0 { 1 } else { mixed }),
        }
    }

    /// Next raw 64-bit output.
    pub fn next_u64(&self) -> u64 {
        let mut x = self.state.get();
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state.set(x);
        x
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&self) -> f64 {
        // Top 53 bits map exactly onto the f64 mantissa.
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// A source that replays a fixed list of values, cycling when exhausted.
///
/// Useful for pinning exact outcomes in tests.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: Cell<usize>,
}

impl ScriptedRandom {
    /// Values are clamped into `[0, 1)`. An empty script always yields `0.0`.
    #[must_use]
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| if v.is_finite() { v.clamp(0.0, 1.0 - f64::EPSILON) } else { 0.0 })
            .collect();
        Self {
            values,
            cursor: Cell::new(0),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let i = self.cursor.get();
        self.cursor.set((i + 1) % self.values.len());
        self.values[i]
    }
}

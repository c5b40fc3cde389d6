#![forbid(unsafe_code)]

//! Effect configuration.
//!
//! Every struct defaults to the stock celebration look and deserializes with
//! `#[serde(default)]`, so a host may override any subset of fields. Call
//! [`EffectsConfig::validate`] after deserializing untrusted input.

use std::time::Duration;

use festoon_core::color::Rgb;
use festoon_core::random::RandomSource;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Half-open sampling interval `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformRange {
    pub min: f64,
    pub max: f64,
}

impl UniformRange {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Draw one value from the range.
    pub fn sample(&self, random: &dyn RandomSource) -> f64 {
        random.range(self.min, self.max)
    }

    /// Whether `value` lies in `[min, max)`, or equals `min` for an empty range.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value == self.min || (value >= self.min && value < self.max)
    }

    fn validate(&self, field: &'static str, domain: Option<(f64, f64)>) -> Result<(), ConfigError> {
        let in_domain = domain.is_none_or(|(lo, hi)| self.min >= lo && self.max <= hi);
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max && in_domain {
            Ok(())
        } else {
            Err(ConfigError::InvalidRange {
                field,
                min: self.min,
                max: self.max,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Particles
// ---------------------------------------------------------------------------

/// Ambient particle field parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Number of particles; fixed for the field's lifetime.
    pub count: usize,
    /// Radius in pixels.
    pub radius: UniformRange,
    /// Per-axis velocity in pixels per frame.
    pub velocity: UniformRange,
    /// Opacity.
    pub alpha: UniformRange,
    /// Hue band in degrees.
    pub hue: UniformRange,
    /// Saturation percent, shared by every particle.
    pub saturation: f64,
    /// Lightness percent, shared by every particle.
    pub lightness: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 50,
            radius: UniformRange::new(1.0, 3.0),
            velocity: UniformRange::new(-0.25, 0.25),
            alpha: UniformRange::new(0.2, 0.7),
            hue: UniformRange::new(240.0, 300.0),
            saturation: 100.0,
            lightness: 50.0,
        }
    }
}

impl ParticleConfig {
    /// Set the particle count (builder).
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Set the velocity range (builder).
    #[must_use]
    pub fn with_velocity(mut self, velocity: UniformRange) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.radius.validate("particles.radius", Some((0.0, f64::MAX)))?;
        self.velocity.validate("particles.velocity", None)?;
        self.alpha.validate("particles.alpha", Some((0.0, 1.0)))?;
        self.hue.validate("particles.hue", Some((0.0, 360.0)))?;
        UniformRange::new(self.saturation, self.saturation)
            .validate("particles.saturation", Some((0.0, 100.0)))?;
        UniformRange::new(self.lightness, self.lightness)
            .validate("particles.lightness", Some((0.0, 100.0)))
    }
}

// ---------------------------------------------------------------------------
// Confetti
// ---------------------------------------------------------------------------

/// Stock confetti palette.
pub const DEFAULT_PALETTE: [Rgb; 5] = [
    Rgb::from_u24(0xFF6B9D),
    Rgb::from_u24(0xC44569),
    Rgb::from_u24(0xFFC75F),
    Rgb::from_u24(0x667EEA),
    Rgb::from_u24(0x764BA2),
];

/// Confetti burst parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    /// Piece colors, as `#RRGGBB` strings when serialized.
    #[serde(with = "hex_palette")]
    pub palette: Vec<Rgb>,
    /// Default piece count for an anchored burst.
    pub burst_count: usize,
    /// Default piece count for a fullscreen shower.
    pub fullscreen_count: usize,
    /// Spacing between anchored spawns.
    pub burst_stagger_ms: u64,
    /// Spacing between fullscreen spawns.
    pub fullscreen_stagger_ms: u64,
    /// Horizontal jitter around the anchor, in pixels.
    pub jitter: UniformRange,
    /// Horizontal drift applied by the piece animation, in pixels.
    pub drift: UniformRange,
    /// Animation delay in seconds.
    pub delay_secs: UniformRange,
    /// Animation duration in seconds.
    pub duration_secs: UniformRange,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.to_vec(),
            burst_count: 50,
            fullscreen_count: 200,
            burst_stagger_ms: 10,
            fullscreen_stagger_ms: 20,
            jitter: UniformRange::new(-50.0, 50.0),
            drift: UniformRange::new(-150.0, 150.0),
            delay_secs: UniformRange::new(0.0, 0.2),
            duration_secs: UniformRange::new(2.5, 3.5),
        }
    }
}

impl BurstConfig {
    /// Replace the palette (builder).
    #[must_use]
    pub fn with_palette(mut self, palette: impl Into<Vec<Rgb>>) -> Self {
        self.palette = palette.into();
        self
    }

    /// Spacing between anchored spawns.
    #[must_use]
    pub fn burst_stagger(&self) -> Duration {
        Duration::from_millis(self.burst_stagger_ms)
    }

    /// Spacing between fullscreen spawns.
    #[must_use]
    pub fn fullscreen_stagger(&self) -> Duration {
        Duration::from_millis(self.fullscreen_stagger_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        self.jitter.validate("burst.jitter", None)?;
        self.drift.validate("burst.drift", None)?;
        self.delay_secs.validate("burst.delay_secs", Some((0.0, f64::MAX)))?;
        self.duration_secs
            .validate("burst.duration_secs", Some((0.0, f64::MAX)))
    }
}

mod hex_palette {
    use festoon_core::color::Rgb;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(palette: &[Rgb], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(palette.iter().map(ToString::to_string))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Rgb>, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        raw.iter()
            .map(|s| s.parse::<Rgb>().map_err(D::Error::custom))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Counter
// ---------------------------------------------------------------------------

/// Counter animation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Default animation length.
    pub duration_ms: u64,
    /// Assumed frame interval for the per-frame increment hint.
    pub frame_hint_ms: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            frame_hint_ms: 16,
        }
    }
}

impl CounterConfig {
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    #[must_use]
    pub fn frame_hint(&self) -> Duration {
        Duration::from_millis(self.frame_hint_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duration_ms == 0 {
            return Err(ConfigError::ZeroDuration("counter.duration_ms"));
        }
        if self.frame_hint_ms == 0 {
            return Err(ConfigError::ZeroDuration("counter.frame_hint_ms"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Aggregate
// ---------------------------------------------------------------------------

/// All effect parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub particles: ParticleConfig,
    pub burst: BurstConfig,
    pub counter: CounterConfig,
}

impl EffectsConfig {
    /// Check every section, reporting the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let result = self
            .particles
            .validate()
            .and_then(|()| self.burst.validate())
            .and_then(|()| self.counter.validate());
        if let Err(err) = &result {
            tracing::warn!(%err, "effects configuration rejected");
        }
        result
    }
}

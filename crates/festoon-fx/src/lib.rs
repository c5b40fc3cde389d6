#![forbid(unsafe_code)]

//! Effects: the ambient particle field, confetti bursts, and stat counters,
//! plus their configuration and in-memory collaborators.

pub mod confetti;
pub mod config;
pub mod counter;
pub mod error;
pub mod headless;
pub mod particles;

pub use confetti::{BurstEmitter, ConfettiPiece, EmitterStats, MountPoint};
pub use config::{BurstConfig, CounterConfig, EffectsConfig, ParticleConfig, UniformRange};
pub use counter::{CounterPhase, CounterTarget, TextTarget, ValueCounter};
pub use error::ConfigError;
pub use particles::{Particle, ParticleField, Surface};

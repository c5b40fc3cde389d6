#![forbid(unsafe_code)]

//! Festoon public facade crate.
//!
//! Re-exports the host traits, effects and page composition from the
//! internal crates and offers a prelude for day-to-day use.

// --- Core re-exports -------------------------------------------------------

pub use festoon_core::color::{Color, Hsl, Rgb};
pub use festoon_core::geometry::{Point, Size};
pub use festoon_core::host::{
    Clock, DelayScheduler, Detach, FixedViewport, FrameScheduler, HostServices, Task, Viewport,
};
pub use festoon_core::key_sequence::{KONAMI_CODE, KeySequenceAction, KeySequenceMatcher};
pub use festoon_core::locale::Locale;
pub use festoon_core::random::{RandomSource, SeededRandom};
pub use festoon_core::sim::VirtualHost;

#[cfg(feature = "tracing-json")]
pub use festoon_core::logging::init_tracing;

// --- Effect re-exports -----------------------------------------------------

pub use festoon_fx::{
    BurstConfig, BurstEmitter, ConfettiPiece, ConfigError, CounterConfig, CounterPhase,
    CounterTarget, EffectsConfig, MountPoint, Particle, ParticleConfig, ParticleField, Surface,
    TextTarget, ValueCounter,
};

/// Recording collaborators for native hosts and tests.
pub mod headless {
    pub use festoon_fx::headless::{
        DrawOp, RecordedPiece, RecordingMount, RecordingSurface, RecordingText,
    };
    #[cfg(feature = "page")]
    pub use festoon_web::headless::{RecordedFlash, RecordingChrome, RecordingStyle};
}

// --- Page re-exports -------------------------------------------------------

#[cfg(feature = "page")]
pub use festoon_web::{
    Celebration, Collaborators, PageBackend, PageChrome, PageConfig, StyleTarget, Theme, WebError,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BurstEmitter, Clock, ConfigError, DelayScheduler, EffectsConfig, FrameScheduler,
        HostServices, ParticleField, Point, RandomSource, SeededRandom, Size, Surface, TextTarget,
        ValueCounter, Viewport, VirtualHost,
    };

    #[cfg(feature = "page")]
    pub use crate::{Celebration, Collaborators, PageConfig};
}

#![forbid(unsafe_code)]

//! Core: host collaborator traits, deterministic scheduling, and the small
//! shared primitives (geometry, color, wall-clock progress, locale digit
//! grouping, key sequences) used by Festoon effects.

pub mod animation;
pub mod color;
pub mod geometry;
pub mod host;
pub mod key_sequence;
pub mod locale;
pub mod logging;
pub mod random;
pub mod sim;

pub use host::{Clock, DelayScheduler, Detach, FrameScheduler, HostServices, Task, Viewport};
pub use random::{RandomSource, SeededRandom};
pub use sim::VirtualHost;

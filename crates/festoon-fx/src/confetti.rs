#![forbid(unsafe_code)]

//! Confetti bursts.
//!
//! A burst schedules a batch of staggered spawns. Each spawn mounts one
//! [`ConfettiPiece`] on the host's [`MountPoint`] and schedules its own
//! removal once its animation has played out. Pieces are independent: no
//! ordering between spawns, frames, or removals is assumed.
//!
//! # Invariants
//!
//! 1. A request for `count` pieces schedules exactly `count` spawns; zero
//!    schedules nothing.
//! 2. Every mounted piece is detached exactly once, `delay + duration` after
//!    it was mounted.
//! 3. `live()` is `mounted - removed` and returns to zero once all timers
//!    have fired.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use festoon_core::animation::stagger::stagger_offsets;
use festoon_core::color::Rgb;
use festoon_core::geometry::Point;
use festoon_core::host::{Detach, HostServices, Viewport};
use festoon_core::random::RandomSource;

use crate::config::BurstConfig;

/// CSS class carried by every piece element.
pub const PIECE_CLASS: &str = "confetti";

/// One ephemeral confetti element, fully decided at spawn time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfettiPiece {
    /// Spawn position (the element's `left`/`top`).
    pub position: Point,
    pub color: Rgb,
    /// Horizontal translation applied by the fall animation, in pixels.
    pub drift: f64,
    pub delay: Duration,
    pub duration: Duration,
}

impl ConfettiPiece {
    /// Roll color, delay, duration and drift for a piece at `position`.
    pub fn random(position: Point, random: &dyn RandomSource, config: &BurstConfig) -> Self {
        let color = config
            .palette
            .get(random.index(config.palette.len()))
            .copied()
            .unwrap_or(Rgb::new(255, 255, 255));
        let delay = secs(config.delay_secs.sample(random));
        let duration = secs(config.duration_secs.sample(random));
        let drift = config.drift.sample(random);
        Self {
            position,
            color,
            drift,
            delay,
            duration,
        }
    }

    /// Time from mounting until the piece must be removed.
    #[must_use]
    pub fn lifetime(&self) -> Duration {
        self.delay.saturating_add(self.duration)
    }

    /// Inline style declarations, as `(property, value)` pairs.
    #[must_use]
    pub fn style_properties(&self) -> [(&'static str, String); 6] {
        [
            ("left", format!("{}px", self.position.x)),
            ("top", format!("{}px", self.position.y)),
            ("background-color", self.color.to_string()),
            ("animation-delay", format!("{}s", self.delay.as_secs_f64())),
            ("animation-duration", format!("{}s", self.duration.as_secs_f64())),
            ("transform", format!("translateX({}px)", self.drift)),
        ]
    }

    /// The declarations joined into a `style` attribute value.
    #[must_use]
    pub fn inline_style(&self) -> String {
        self.style_properties()
            .iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}

/// The display subtree that receives confetti elements.
pub trait MountPoint {
    /// Handle to one mounted element.
    type Handle: Detach + 'static;

    /// Create and attach an element for `piece`.
    fn mount(&self, piece: &ConfettiPiece) -> Self::Handle;
}

/// Running totals for an emitter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitterStats {
    /// Spawns handed to the timer queue.
    pub scheduled: u64,
    /// Pieces attached to the mount point.
    pub mounted: u64,
    /// Pieces detached again.
    pub removed: u64,
}

impl EmitterStats {
    /// Pieces currently attached.
    #[must_use]
    pub const fn live(&self) -> u64 {
        self.mounted - self.removed
    }
}

struct EmitterInner<M> {
    mount: M,
    services: HostServices,
    viewport: Rc<dyn Viewport>,
    config: BurstConfig,
    stats: Rc<Cell<EmitterStats>>,
}

impl<M: MountPoint> EmitterInner<M> {
    fn spawn(&self, at: Point) {
        let piece = ConfettiPiece::random(at, &*self.services.random, &self.config);
        let handle = self.mount.mount(&piece);
        update(&self.stats, |s| s.mounted += 1);

        let stats = Rc::clone(&self.stats);
        self.services.timers.after(
            piece.lifetime(),
            Box::new(move || {
                handle.detach();
                update(&stats, |s| s.removed += 1);
            }),
        );
    }
}

fn update(stats: &Cell<EmitterStats>, f: impl FnOnce(&mut EmitterStats)) {
    let mut s = stats.get();
    f(&mut s);
    stats.set(s);
}

/// Schedules confetti spawns on demand. Cheap to clone.
pub struct BurstEmitter<M> {
    inner: Rc<EmitterInner<M>>,
}

impl<M> Clone for BurstEmitter<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<M> fmt::Debug for BurstEmitter<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BurstEmitter")
            .field("stats", &self.inner.stats.get())
            .finish_non_exhaustive()
    }
}

impl<M: MountPoint + 'static> BurstEmitter<M> {
    pub fn new(
        mount: M,
        services: HostServices,
        viewport: Rc<dyn Viewport>,
        config: BurstConfig,
    ) -> Self {
        Self {
            inner: Rc::new(EmitterInner {
                mount,
                services,
                viewport,
                config,
                stats: Rc::new(Cell::new(EmitterStats::default())),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &BurstConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn mount_point(&self) -> &M {
        &self.inner.mount
    }

    #[must_use]
    pub fn stats(&self) -> EmitterStats {
        self.inner.stats.get()
    }

    /// Spray `count` pieces around `(at.x ± jitter, at.y)`.
    ///
    /// Spawns are spaced by the burst stagger; each one draws its jitter
    /// when it fires. Returns the number of spawns scheduled.
    pub fn burst(&self, at: Point, count: usize) -> usize {
        let offsets = stagger_offsets(count, self.inner.config.burst_stagger());
        for offset in &offsets {
            let inner = Rc::clone(&self.inner);
            self.inner.services.timers.after(
                *offset,
                Box::new(move || {
                    let dx = inner.config.jitter.sample(&*inner.services.random);
                    inner.spawn(at.offset(dx, 0.0));
                }),
            );
        }
        self.record_scheduled(offsets.len(), "burst");
        offsets.len()
    }

    /// [`burst`](Self::burst) with the configured default count.
    pub fn burst_default(&self, at: Point) -> usize {
        self.burst(at, self.inner.config.burst_count)
    }

    /// Shower `count` pieces at uniformly random viewport positions.
    ///
    /// Positions are drawn now, against the current viewport; spawns are
    /// spaced by the fullscreen stagger. Returns the number scheduled.
    pub fn fullscreen(&self, count: usize) -> usize {
        let viewport = self.inner.viewport.size();
        let random = &*self.inner.services.random;
        let offsets = stagger_offsets(count, self.inner.config.fullscreen_stagger());
        for offset in &offsets {
            let at = Point::new(
                random.next_unit() * viewport.width_f64(),
                random.next_unit() * viewport.height_f64(),
            );
            let inner = Rc::clone(&self.inner);
            self.inner
                .services
                .timers
                .after(*offset, Box::new(move || inner.spawn(at)));
        }
        self.record_scheduled(offsets.len(), "fullscreen");
        offsets.len()
    }

    /// [`fullscreen`](Self::fullscreen) with the configured default count.
    pub fn fullscreen_default(&self) -> usize {
        self.fullscreen(self.inner.config.fullscreen_count)
    }

    fn record_scheduled(&self, count: usize, kind: &'static str) {
        if count == 0 {
            return;
        }
        update(&self.inner.stats, |s| s.scheduled += count as u64);
        tracing::debug!(kind, count, "confetti scheduled");
    }
}

#![forbid(unsafe_code)]

//! Ambient particle field.
//!
//! A fixed population of small translucent dots drifting across a
//! full-viewport surface. The field is a torus: anything that leaves one edge
//! re-enters from the opposite one, so particles are never created or
//! destroyed after construction.
//!
//! # Invariants
//!
//! 1. `len()` is constant for the field's lifetime.
//! 2. After every [`ParticleField::tick`], each position lies in
//!    `[0, width) × [0, height)` of the surface, for any velocity magnitude.
//! 3. [`ParticleField::render`] leaves the surface's global alpha at 1.
//!
//! # Determinism
//!
//! All randomness is drawn at construction in a fixed order (x, y, radius,
//! vx, vy, alpha, hue per particle), so a seeded source reproduces the field
//! exactly.

use std::cell::RefCell;
use std::rc::Rc;

use festoon_core::color::{Color, Hsl};
use festoon_core::geometry::{Point, Size};
use festoon_core::host::FrameScheduler;
use festoon_core::random::RandomSource;

use crate::config::ParticleConfig;

/// A canvas-like drawing target owned by the particle field.
pub trait Surface {
    /// Current backing size in pixels.
    fn size(&self) -> Size;
    /// Resize the backing store. Implementations may clear as a side effect.
    fn set_size(&mut self, size: Size);
    /// Clear the whole surface.
    fn clear(&mut self);
    /// Fill a circle with `color` at opacity `alpha`.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Color, alpha: f64);
    /// Restore global alpha to 1 so later, unrelated draws are unaffected.
    fn reset_alpha(&mut self);
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn size(&self) -> Size {
        (**self).size()
    }

    fn set_size(&mut self, size: Size) {
        (**self).set_size(size);
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color, alpha: f64) {
        (**self).fill_circle(center, radius, color, alpha);
    }

    fn reset_alpha(&mut self) {
        (**self).reset_alpha();
    }
}

/// One drifting dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Point,
    /// Pixels per frame on each axis.
    pub velocity: Point,
    pub radius: f64,
    pub alpha: f64,
    pub color: Hsl,
}

impl Particle {
    /// Draw a particle uniformly over `bounds` using `config`'s ranges.
    pub fn random(bounds: Size, random: &dyn RandomSource, config: &ParticleConfig) -> Self {
        let x = random.next_unit() * bounds.width_f64();
        let y = random.next_unit() * bounds.height_f64();
        let radius = config.radius.sample(random);
        let vx = config.velocity.sample(random);
        let vy = config.velocity.sample(random);
        let alpha = config.alpha.sample(random);
        let hue = config.hue.sample(random);
        Self {
            position: Point::new(x, y),
            velocity: Point::new(vx, vy),
            radius,
            alpha,
            color: Hsl::new(hue, config.saturation, config.lightness),
        }
    }

    /// Move one frame and wrap into `bounds`.
    #[inline]
    pub fn advance(&mut self, bounds: Size) {
        let moved = self.position.offset(self.velocity.x, self.velocity.y);
        self.position = bounds.wrap(moved);
    }
}

/// Fixed-population drift field bound to one surface.
#[derive(Debug)]
pub struct ParticleField<S> {
    surface: S,
    particles: Vec<Particle>,
    frames: u64,
}

impl<S: Surface> ParticleField<S> {
    /// Populate a field over the surface's current size.
    pub fn new(surface: S, random: &dyn RandomSource, config: &ParticleConfig) -> Self {
        let bounds = surface.size();
        let particles = (0..config.count)
            .map(|_| Particle::random(bounds, random, config))
            .collect();
        tracing::debug!(
            count = config.count,
            width = bounds.width,
            height = bounds.height,
            "particle field created"
        );
        Self {
            surface,
            particles,
            frames: 0,
        }
    }

    /// Number of particles. Never changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Frames rendered through [`frame`](Self::frame).
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance every particle one frame, wrapping at the surface edges.
    pub fn tick(&mut self) {
        let bounds = self.surface.size();
        for particle in &mut self.particles {
            particle.advance(bounds);
        }
    }

    /// Clear the surface and draw every particle.
    pub fn render(&mut self) {
        self.surface.clear();
        for p in &self.particles {
            self.surface
                .fill_circle(p.position, p.radius, Color::Hsl(p.color), p.alpha);
        }
        self.surface.reset_alpha();
    }

    /// One animation frame: tick, then render.
    pub fn frame(&mut self) {
        self.tick();
        self.render();
        self.frames += 1;
    }

    /// Match the surface to a new viewport size.
    ///
    /// Particle positions are left alone; any now out of bounds wrap back in
    /// on the next tick.
    pub fn resize(&mut self, size: Size) {
        if self.surface.size() == size {
            return;
        }
        tracing::trace!(width = size.width, height = size.height, "particle surface resized");
        self.surface.set_size(size);
    }
}

impl<S: Surface + 'static> ParticleField<S> {
    /// Run one frame now and keep running one per rendered frame, forever.
    ///
    /// The loop holds a strong reference to the field, so the field lives as
    /// long as the frame scheduler keeps calling back.
    pub fn start(field: &Rc<RefCell<Self>>, frames: Rc<dyn FrameScheduler>) {
        field.borrow_mut().frame();
        schedule_next(Rc::clone(field), frames);
    }
}

fn schedule_next<S: Surface + 'static>(
    field: Rc<RefCell<ParticleField<S>>>,
    frames: Rc<dyn FrameScheduler>,
) {
    let scheduler = Rc::clone(&frames);
    frames.request_frame(Box::new(move || {
        field.borrow_mut().frame();
        schedule_next(field, scheduler);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{DrawOp, RecordingSurface};
    use festoon_core::random::{ScriptedRandom, SeededRandom};
    use festoon_core::sim::VirtualHost;

    fn field(seed: u64, size: Size) -> ParticleField<RecordingSurface> {
        ParticleField::new(
            RecordingSurface::new(size),
            &SeededRandom::new(seed),
            &ParticleConfig::default(),
        )
    }

    #[test]
    fn initial_particles_follow_config_ranges() {
        let f = field(1, Size::new(800, 600));
        let cfg = ParticleConfig::default();
        assert_eq!(f.len(), 50);
        for p in f.particles() {
            assert!(Size::new(800, 600).contains(p.position));
            assert!(cfg.radius.contains(p.radius));
            assert!(cfg.velocity.contains(p.velocity.x));
            assert!(cfg.velocity.contains(p.velocity.y));
            assert!(cfg.alpha.contains(p.alpha));
            assert!(cfg.hue.contains(p.color.hue));
            assert_eq!(p.color.saturation, 100.0);
            assert_eq!(p.color.lightness, 50.0);
        }
    }

    #[test]
    fn scripted_random_pins_sampling_order() {
        let rng = ScriptedRandom::new(vec![0.5, 0.25, 0.0, 1.0 - f64::EPSILON, 0.5, 0.0, 0.5]);
        let cfg = ParticleConfig::default().with_count(1);
        let f = ParticleField::new(RecordingSurface::new(Size::new(200, 100)), &rng, &cfg);
        let p = f.particles()[0];
        assert_eq!(p.position, Point::new(100.0, 25.0));
        assert_eq!(p.radius, 1.0);
        assert!(p.velocity.x > 0.2499);
        assert_eq!(p.velocity.y, 0.0);
        assert!((p.alpha - 0.2).abs() < 1e-12);
        assert_eq!(p.color.hue, 270.0);
    }

    #[test]
    fn tick_wraps_low_edge_to_far_side() {
        let mut f = field(2, Size::new(100, 100));
        f.particles[0].position = Point::new(0.1, 50.0);
        f.particles[0].velocity = Point::new(-0.2, 0.0);
        f.tick();
        assert!((f.particles()[0].position.x - 99.9).abs() < 1e-9);
    }

    #[test]
    fn tick_wraps_high_edge_to_zero_side() {
        let mut f = field(2, Size::new(100, 100));
        f.particles[0].position = Point::new(50.0, 99.9);
        f.particles[0].velocity = Point::new(0.0, 0.2);
        f.tick();
        assert!((f.particles()[0].position.y - 0.1).abs() < 1e-9);
    }

    #[test]
    fn render_clears_draws_and_resets_alpha() {
        let mut f = field(3, Size::new(300, 200));
        f.render();
        let ops = f.surface().ops();
        assert_eq!(ops.first(), Some(&DrawOp::Clear));
        assert_eq!(ops.last(), Some(&DrawOp::ResetAlpha));
        let circles = ops.iter().filter(|op| matches!(op, DrawOp::Circle { .. })).count();
        assert_eq!(circles, 50);
        assert_eq!(f.surface().global_alpha(), 1.0);
    }

    #[test]
    fn resize_keeps_positions_until_next_tick() {
        let mut f = field(4, Size::new(1000, 1000));
        let before: Vec<Point> = f.particles().iter().map(|p| p.position).collect();
        f.resize(Size::new(10, 10));
        assert_eq!(f.surface().size(), Size::new(10, 10));
        let after: Vec<Point> = f.particles().iter().map(|p| p.position).collect();
        assert_eq!(before, after);
        f.tick();
        assert!(f.particles().iter().all(|p| Size::new(10, 10).contains(p.position)));
    }

    #[test]
    fn zero_sized_surface_pins_particles_to_origin() {
        let mut f = field(5, Size::new(0, 0));
        f.tick();
        assert!(f.particles().iter().all(|p| p.position == Point::new(0.0, 0.0)));
    }

    #[test]
    fn start_runs_one_frame_now_and_one_per_frame_after() {
        let host = Rc::new(VirtualHost::new());
        let f = Rc::new(RefCell::new(field(6, Size::new(640, 480))));
        ParticleField::start(&f, host.clone());
        assert_eq!(f.borrow().frames(), 1);
        assert_eq!(host.pending_frames(), 1);
        for _ in 0..10 {
            host.run_frame();
        }
        assert_eq!(f.borrow().frames(), 11);
        assert_eq!(host.pending_frames(), 1);
    }
}
